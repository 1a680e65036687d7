use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use crate::models::booking::{BookingConfirmation, BookingRequest};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;

/// Book seats on a show
#[openapi(tag = "Book")]
#[post("/book-movie", format = "json", data = "<request>")]
pub async fn book_movie(
    request: Json<BookingRequest>,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let request = request.into_inner();
    tracing::debug!(?request, "booking request");

    let response = booking_service.book(request).await?;
    Ok(Json(response))
}

// A body without a JSON content type is never decoded: every field is missing
#[post("/book-movie", rank = 2)]
pub async fn book_movie_without_json(
    booking_service: &State<BookingService>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let response = booking_service.book(BookingRequest::default()).await?;
    Ok(Json(response))
}
