use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use crate::models::movie::{AddMovieResponse, Movie, NewMovie};
use crate::services::movie_service::MovieService;
use crate::utils::error::AppError;

/// List every movie
#[openapi(tag = "Movies")]
#[get("/get-movies")]
pub async fn get_movies(
    movie_service: &State<MovieService>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = movie_service.list_movies().await?;
    Ok(Json(movies))
}

/// Fetch one movie by id
#[openapi(tag = "Movies")]
#[get("/<id>")]
pub async fn get_movie(
    id: String,
    movie_service: &State<MovieService>,
) -> Result<Json<Movie>, AppError> {
    let movie = movie_service.get_movie(&id).await?;
    Ok(Json(movie))
}

/// Add a movie; the id is assigned by the server
#[openapi(tag = "Movies")]
#[post("/add-movie", format = "json", data = "<request>")]
pub async fn add_movie(
    request: Json<NewMovie>,
    movie_service: &State<MovieService>,
) -> Result<Created<Json<AddMovieResponse>>, AppError> {
    let movie = movie_service.add_movie(request.into_inner()).await?;
    let location = format!("/movie/{}", movie.id);

    Ok(Created::new(location).body(Json(AddMovieResponse {
        message: "Movie added successfully".to_string(),
        movie,
    })))
}
