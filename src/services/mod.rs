pub mod booking_service;
pub mod movie_service;
