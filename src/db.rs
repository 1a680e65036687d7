use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::utils::config::AppConfig;

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str, config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    // One row per movie; the whole movie lives in the JSON document column
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movie (
                id CHAR(36) NOT NULL PRIMARY KEY,
                document JSON NOT NULL,
                created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
