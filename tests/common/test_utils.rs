#![allow(dead_code)]

use dotenv::dotenv;
use movie_booking::db::Database;
use movie_booking::utils::config::AppConfig;
use once_cell::sync::OnceCell;
use sqlx::mysql::MySqlPool as Pool;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::Error;
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

static TEST_DB: OnceCell<Mutex<Option<TestDb>>> = OnceCell::new();
static DB_NAME: OnceCell<String> = OnceCell::new();

#[derive(Debug)]
pub struct TestDb {
    pub pool: Pool,
    pub db_name: String,
}

fn base_url() -> String {
    dotenv().ok();
    let db_url = env::var("ADMIN_DATABASE_URL")
        .expect("ADMIN_DATABASE_URL must be set in .env file");

    db_url.split('/').take(3).collect::<Vec<&str>>().join("/")
}

// Create a connection pool without a database, used to create a new database
async fn create_connection_pool_without_db() -> Result<Pool, Error> {
    MySqlPoolOptions::new()
        .max_connections(2)
        .connect(&base_url())
        .await
}

impl TestDb {
    // One database per test binary run, shared by every test in it
    pub async fn get_instance() -> Result<Pool, Error> {
        let test_db = TEST_DB.get_or_init(|| Mutex::new(None));
        let mut guard = test_db.lock().await;

        if let Some(db) = guard.as_ref() {
            return Ok(db.pool.clone());
        }

        let db = Self::setup_database().await?;
        let pool = db.pool.clone();
        *guard = Some(db);
        Ok(pool)
    }

    async fn setup_database() -> Result<Self, Error> {
        let db_name = DB_NAME
            .get_or_init(|| {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or_default();
                format!("movie_test_{}", nanos)
            })
            .clone();

        let admin_pool = create_connection_pool_without_db().await?;
        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&admin_pool)
            .await?;

        let config = AppConfig::from_lookup(|key| match key {
            "STORE_BACKEND" => Some("mysql".to_string()),
            "DATABASE_URL" => Some(format!("{}/{}", base_url(), db_name)),
            _ => None,
        })
        .expect("test config");

        let url = config.database_url.clone().unwrap_or_default();
        let database = Database::new(&url, &config).await?;
        database.init_schema().await?;

        Ok(Self {
            pool: database.pool,
            db_name,
        })
    }

    // Teardown: drop the database after the test run (not after each test)
    pub fn cleanup_database_sync() -> Result<(), Error> {
        let Some(db_name) = DB_NAME.get() else {
            return Ok(());
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Io)?;

        runtime.block_on(async {
            let admin_pool = create_connection_pool_without_db().await?;
            sqlx::query(&format!("DROP DATABASE IF EXISTS {}", db_name))
                .execute(&admin_pool)
                .await?;
            Ok(())
        })
    }
}
