use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::models::movie::{Movie, MovieId, NewMovie, Show};
use crate::store::MovieStore;
use crate::utils::error::{AppError, AppResult};

#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn MovieStore>,
}

impl MovieService {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        MovieService { store }
    }

    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.store.find_all().await
    }

    pub async fn get_movie(&self, id: &str) -> AppResult<Movie> {
        let id = MovieId::parse(id)?;

        self.store
            .find_one(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".into()))
    }

    // Add a movie under a freshly generated id
    pub async fn add_movie(&self, new_movie: NewMovie) -> AppResult<Movie> {
        let NewMovie { shows, mut details } = new_movie;

        let show_count = validate_show_ids(&shows)?;
        details.remove("_id");

        let movie = Movie {
            id: MovieId::generate(),
            shows,
            details,
        };

        self.store.insert_one(&movie).await?;
        tracing::info!(movie_id = %movie.id, shows = show_count, "movie added");

        Ok(movie)
    }
}

// show ids address bookings, so they must be unique across all dates
fn validate_show_ids(shows: &BTreeMap<String, Vec<Show>>) -> AppResult<usize> {
    let mut seen = HashSet::new();
    for show in shows.values().flatten() {
        if show.id.trim().is_empty() {
            return Err(AppError::ValidationError("Show id must not be empty".into()));
        }
        if !seen.insert(show.id.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Duplicate show id {}",
                show.id
            )));
        }
    }
    Ok(seen.len())
}
