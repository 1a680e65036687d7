use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::movie::{Movie, MovieId};
use crate::store::{MovieStore, ShowUpdate};
use crate::utils::error::{AppError, AppResult};

/// In-process movie store. Movies are listed in insertion order.
#[derive(Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<IndexMap<MovieId, Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let movies = movies.into_iter().map(|movie| (movie.id, movie)).collect();
        InMemoryMovieStore {
            movies: RwLock::new(movies),
        }
    }
}

#[rocket::async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.read().await.values().cloned().collect())
    }

    async fn find_one(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn insert_one(&self, movie: &Movie) -> AppResult<()> {
        let mut movies = self.movies.write().await;
        if movies.contains_key(&movie.id) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key {}",
                movie.id
            )));
        }
        movies.insert(movie.id, movie.clone());
        Ok(())
    }

    async fn update_show(&self, update: &ShowUpdate) -> AppResult<u64> {
        // precondition and mutation under the same write guard
        let mut movies = self.movies.write().await;

        let show = match movies
            .get_mut(&update.movie_id)
            .and_then(|movie| movie.show_at_mut(&update.address))
        {
            Some(show) => show,
            None => return Ok(0),
        };

        if show.id != update.show_id || show.seats < update.seats {
            return Ok(0);
        }

        show.seats -= update.seats;
        show.bookings.push(update.booking.clone());
        Ok(1)
    }
}
