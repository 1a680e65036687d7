use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Store-native movie key: a UUID rendered in its hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MovieId(#[schemars(with = "String")] Uuid);

impl MovieId {
    pub fn generate() -> Self {
        MovieId(Uuid::new_v4())
    }

    // Malformed ids are rejected before the store is queried
    pub fn parse(raw: &str) -> AppResult<Self> {
        Uuid::parse_str(raw.trim())
            .map(MovieId)
            .map_err(|_| AppError::ValidationError("Invalid movie id".into()))
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: MovieId,
    #[serde(default)]
    pub shows: BTreeMap<String, Vec<Show>>,
    // title, poster, language... passed through untouched
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Movie {
    pub fn show_at(&self, address: &ShowAddress) -> Option<&Show> {
        self.shows
            .get(&address.date_key)
            .and_then(|shows| shows.get(address.index))
    }

    pub fn show_at_mut(&mut self, address: &ShowAddress) -> Option<&mut Show> {
        self.shows
            .get_mut(&address.date_key)
            .and_then(|shows| shows.get_mut(address.index))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Show {
    pub id: String,
    #[serde(deserialize_with = "seat_count")]
    pub seats: u32,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub seats: String,
}

/// Position of a show inside a movie: its date bucket and index in that bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowAddress {
    pub date_key: String,
    pub index: usize,
}

/// Movie fields as sent by a client; the id is always assigned by the service.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NewMovie {
    #[serde(default)]
    pub shows: BTreeMap<String, Vec<Show>>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct AddMovieResponse {
    pub message: String,
    pub movie: Movie,
}

// Seat counts were persisted both as JSON strings and numbers
fn seat_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid seat count {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("invalid seat count {:?}", s))),
        other => Err(D::Error::custom(format!("invalid seat count {}", other))),
    }
}
