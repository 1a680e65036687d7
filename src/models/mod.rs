pub mod booking;
pub mod movie;
