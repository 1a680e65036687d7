use thiserror::Error;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::Request;
use rocket::Response;
use rocket::http::ContentType;
use std::io::Cursor;
use serde_json::json;
use serde::Serialize;
use rocket_okapi::JsonSchema;

#[derive(Error, Debug, Serialize, JsonSchema)]
pub enum AppError {
    // The driver message is kept for the log, never for the client
    #[error("Something went wrong")]
    DatabaseError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    UpdateFailed(String),
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Conflict(_) => Status::Conflict,
            AppError::UpdateFailed(_) => Status::InternalServerError,
            AppError::DatabaseError(_) => Status::InternalServerError,
        }
    }
}

// Convert sqlx::Error (database error) to AppError::DatabaseError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

// A stored document that no longer matches the movie model
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DatabaseError(format!("malformed movie document: {}", err))
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;

// Format all errors from the route level into a JSON `{message}` response
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();

        match &self {
            AppError::DatabaseError(detail) => {
                tracing::error!(uri = %request.uri(), %detail, "store failure");
            }
            AppError::UpdateFailed(detail) => {
                tracing::error!(uri = %request.uri(), %detail, "conditional update was not applied");
            }
            other => {
                tracing::warn!(uri = %request.uri(), status = status.code, "{}", other);
            }
        }

        let json = json!({
            "message": self.to_string()
        });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(None, Cursor::new(json.to_string()))
            .ok()
    }
}
