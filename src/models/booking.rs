use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::movie::{Booking, MovieId};
use crate::utils::error::{AppError, AppResult};

/// Booking request exactly as it arrives on the wire. Every field is optional
/// and loosely typed here so that missing or mistyped fields become a
/// validation error rather than a body-parsing failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(required, length(min = 1))]
    #[serde(default, deserialize_with = "loose_text")]
    pub movie_id: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default, deserialize_with = "loose_text")]
    pub show_id: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default, deserialize_with = "loose_text")]
    pub seats: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default, deserialize_with = "loose_text")]
    pub phone_number: Option<String>,
}

/// A booking request that passed every check that does not need the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub movie_id: MovieId,
    pub show_id: String,
    pub seats: u32,
    pub booking: Booking,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingConfirmation {
    pub message: String,
}

impl BookingRequest {
    pub fn into_validated(self) -> AppResult<ValidatedBooking> {
        if let Err(errors) = self.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| camel_case(field))
                .collect();
            fields.sort();
            return Err(AppError::ValidationError(format!(
                "Some fields are missing: {}",
                fields.join(", ")
            )));
        }

        let (
            Some(movie_id),
            Some(show_id),
            Some(seats),
            Some(name),
            Some(email),
            Some(phone_number),
        ) = (
            self.movie_id,
            self.show_id,
            self.seats,
            self.name,
            self.email,
            self.phone_number,
        )
        else {
            return Err(AppError::ValidationError("Some fields are missing".into()));
        };

        let requested = match seats.trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return Err(AppError::ValidationError("Invalid seat count".into())),
        };

        let movie_id = MovieId::parse(&movie_id)?;

        Ok(ValidatedBooking {
            movie_id,
            show_id,
            seats: requested,
            booking: Booking {
                name,
                email,
                phone_number,
                seats,
            },
        })
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// Strings pass through and numbers ("seats": 3) are kept as their text.
// Anything else counts as a missing field.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
