pub mod booking_route;
pub mod catchers;
pub mod movie_route;
