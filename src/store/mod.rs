use std::sync::Arc;

use crate::db::Database;
use crate::models::movie::{Booking, Movie, MovieId, ShowAddress};
use crate::utils::config::{AppConfig, StoreBackend};
use crate::utils::error::{AppError, AppResult};

pub mod memory_store;
pub mod mysql_store;

pub use memory_store::InMemoryMovieStore;
pub use mysql_store::MySqlMovieStore;

/// Decrement-and-append against one show, addressed by date key and position.
///
/// A store applies it as a single conditional write: only when the element at
/// `address` still carries `show_id` and has at least `seats` remaining. The
/// decrement is relative to the stored value, never an absolute overwrite.
#[derive(Debug, Clone)]
pub struct ShowUpdate {
    pub movie_id: MovieId,
    pub address: ShowAddress,
    pub show_id: String,
    pub seats: u32,
    pub booking: Booking,
}

/// Document store holding movie records.
#[rocket::async_trait]
pub trait MovieStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Movie>>;

    async fn find_one(&self, id: &MovieId) -> AppResult<Option<Movie>>;

    async fn insert_one(&self, movie: &Movie) -> AppResult<()>;

    /// Returns the number of documents modified: 1 when applied, 0 when the
    /// precondition no longer holds.
    async fn update_show(&self, update: &ShowUpdate) -> AppResult<u64>;

    async fn close(&self) {}
}

// Pick the store backend named in the config
pub async fn connect(config: &AppConfig) -> AppResult<Arc<dyn MovieStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("using the in-memory movie store");
            Ok(Arc::new(InMemoryMovieStore::new()))
        }
        StoreBackend::MySql => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| AppError::DatabaseError("DATABASE_URL must be set".into()))?;
            let database = Database::new(url, config).await?;
            database.init_schema().await?;
            tracing::info!(max_connections = config.max_connections, "MySQL connection pool created");
            Ok(Arc::new(MySqlMovieStore::new(database.pool)))
        }
    }
}
