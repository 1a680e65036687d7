#![allow(dead_code)]

use movie_booking::models::booking::BookingRequest;
use movie_booking::models::movie::{Movie, MovieId, Show};
use movie_booking::store::{MovieStore, ShowUpdate};
use movie_booking::utils::error::AppResult;
use serde_json::{json, Map};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SHOW_DATE: &str = "2024-12-08";

// A movie with one date holding the given (show id, seats) pairs
pub fn movie_with_shows(shows: &[(&str, u32)]) -> Movie {
    let mut by_date = BTreeMap::new();
    by_date.insert(
        SHOW_DATE.to_string(),
        shows
            .iter()
            .map(|(id, seats)| Show {
                id: id.to_string(),
                seats: *seats,
                bookings: vec![],
                details: Map::new(),
            })
            .collect(),
    );

    let mut details = Map::new();
    details.insert("title".into(), json!("Arrival"));

    Movie {
        id: MovieId::generate(),
        shows: by_date,
        details,
    }
}

pub fn booking_request(movie_id: &MovieId, show_id: &str, seats: &str) -> BookingRequest {
    BookingRequest {
        movie_id: Some(movie_id.to_string()),
        show_id: Some(show_id.to_string()),
        seats: Some(seats.to_string()),
        name: Some("Ada Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        phone_number: Some("555-0100".to_string()),
    }
}

pub fn show<'a>(movie: &'a Movie, show_id: &str) -> &'a Show {
    movie
        .shows
        .values()
        .flatten()
        .find(|show| show.id == show_id)
        .expect("show should exist")
}

/// Wraps a store and counts every call that reaches it.
pub struct RecordingStore {
    inner: Arc<dyn MovieStore>,
    calls: AtomicUsize,
    updates: AtomicUsize,
}

impl RecordingStore {
    pub fn new(inner: Arc<dyn MovieStore>) -> Self {
        RecordingStore {
            inner,
            calls: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[rocket::async_trait]
impl MovieStore for RecordingStore {
    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn find_one(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_one(id).await
    }

    async fn insert_one(&self, movie: &Movie) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_one(movie).await
    }

    async fn update_show(&self, update: &ShowUpdate) -> AppResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_show(update).await
    }
}

/// Reads go to the wrapped store; every conditional update reports that
/// nothing matched, as when another booking changed the show first.
pub struct StaleStore {
    inner: Arc<dyn MovieStore>,
}

impl StaleStore {
    pub fn new(inner: Arc<dyn MovieStore>) -> Self {
        StaleStore { inner }
    }
}

#[rocket::async_trait]
impl MovieStore for StaleStore {
    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        self.inner.find_all().await
    }

    async fn find_one(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        self.inner.find_one(id).await
    }

    async fn insert_one(&self, movie: &Movie) -> AppResult<()> {
        self.inner.insert_one(movie).await
    }

    async fn update_show(&self, _update: &ShowUpdate) -> AppResult<u64> {
        Ok(0)
    }
}
