use std::sync::Arc;

use crate::models::booking::{BookingConfirmation, BookingRequest};
use crate::models::movie::{Movie, ShowAddress};
use crate::store::{MovieStore, ShowUpdate};
use crate::utils::error::{AppError, AppResult};

/// Finds the date bucket and position of a show. Dates are scanned in
/// ascending order and the first matching show wins.
pub fn locate(movie: &Movie, show_id: &str) -> Option<ShowAddress> {
    movie.shows.iter().find_map(|(date_key, shows)| {
        shows
            .iter()
            .position(|show| show.id == show_id)
            .map(|index| ShowAddress {
                date_key: date_key.clone(),
                index,
            })
    })
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn MovieStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        BookingService { store }
    }

    pub async fn book(&self, request: BookingRequest) -> AppResult<BookingConfirmation> {
        // Nothing below this line runs for a request that fails validation
        let booking = request.into_validated()?;

        let movie = self
            .store
            .find_one(&booking.movie_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Requested movie is not found".into()))?;

        let address = locate(&movie, &booking.show_id)
            .ok_or_else(|| AppError::NotFound("Show not found".into()))?;
        let show = movie
            .show_at(&address)
            .ok_or_else(|| AppError::NotFound("Show not found".into()))?;

        if show.seats < booking.seats {
            tracing::warn!(
                movie_id = %booking.movie_id,
                show_id = %booking.show_id,
                available = show.seats,
                requested = booking.seats,
                "not enough seats"
            );
            return Err(AppError::Conflict("Not enough seats available".into()));
        }

        let remaining = show.seats - booking.seats;

        let update = ShowUpdate {
            movie_id: booking.movie_id,
            address,
            show_id: booking.show_id,
            seats: booking.seats,
            booking: booking.booking,
        };

        let modified = self.store.update_show(&update).await?;
        if modified == 0 {
            return Err(AppError::UpdateFailed("Failed to update".into()));
        }

        tracing::info!(
            movie_id = %update.movie_id,
            show_id = %update.show_id,
            date = %update.address.date_key,
            seats = update.seats,
            remaining,
            "booking created"
        );

        Ok(BookingConfirmation {
            message: "Booking created successfully".to_string(),
        })
    }
}
