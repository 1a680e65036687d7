use sqlx::MySqlPool;

use crate::models::movie::{Movie, MovieId, ShowAddress};
use crate::store::{MovieStore, ShowUpdate};
use crate::utils::error::AppResult;

/// Movie documents kept as JSON in a MySQL table.
#[derive(Clone)]
pub struct MySqlMovieStore {
    pool: MySqlPool,
}

impl MySqlMovieStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlMovieStore { pool }
    }
}

/// JSON path to a field of the show at `address`,
/// e.g. `$.shows."2024-05-01"[0].seats`.
pub fn show_field_path(address: &ShowAddress, field: &str) -> String {
    let key = address.date_key.replace('\\', "\\\\").replace('"', "\\\"");
    format!("$.shows.\"{}\"[{}].{}", key, address.index, field)
}

#[rocket::async_trait]
impl MovieStore for MySqlMovieStore {
    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        let documents = sqlx::query_scalar::<_, String>(
            r#"SELECT CAST(document AS CHAR) FROM movie ORDER BY created_at, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut movies = Vec::with_capacity(documents.len());
        for document in documents {
            movies.push(serde_json::from_str(&document)?);
        }
        Ok(movies)
    }

    async fn find_one(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        let document = sqlx::query_scalar::<_, String>(
            r#"SELECT CAST(document AS CHAR) FROM movie WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    async fn insert_one(&self, movie: &Movie) -> AppResult<()> {
        let document = serde_json::to_string(movie)?;

        sqlx::query(r#"INSERT INTO movie (id, document) VALUES (?, CAST(? AS JSON))"#)
            .bind(movie.id.to_string())
            .bind(document)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_show(&self, update: &ShowUpdate) -> AppResult<u64> {
        let id_path = show_field_path(&update.address, "id");
        let seats_path = show_field_path(&update.address, "seats");
        let bookings_path = show_field_path(&update.address, "bookings");
        let booking = serde_json::to_string(&update.booking)?;
        let seats = i64::from(update.seats);

        // Check and write in one statement: the row lock taken by UPDATE
        // serializes concurrent bookings of the same movie, and the WHERE
        // clause is evaluated against the latest committed document.
        let result = sqlx::query(
            r#"
            UPDATE movie
            SET document = JSON_ARRAY_APPEND(
                    JSON_SET(
                        document,
                        ?,
                        CAST(JSON_UNQUOTE(JSON_EXTRACT(document, ?)) AS SIGNED) - ?
                    ),
                    ?,
                    CAST(? AS JSON)
                )
            WHERE id = ?
            AND JSON_UNQUOTE(JSON_EXTRACT(document, ?)) = ?
            AND CAST(JSON_UNQUOTE(JSON_EXTRACT(document, ?)) AS SIGNED) >= ?
            "#,
        )
        .bind(&seats_path)
        .bind(&seats_path)
        .bind(seats)
        .bind(&bookings_path)
        .bind(booking)
        .bind(update.movie_id.to_string())
        .bind(&id_path)
        .bind(&update.show_id)
        .bind(&seats_path)
        .bind(seats)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_quote_the_date_key() {
        let address = ShowAddress {
            date_key: "2024-05-01".into(),
            index: 2,
        };
        assert_eq!(
            show_field_path(&address, "seats"),
            r#"$.shows."2024-05-01"[2].seats"#
        );
    }

    #[test]
    fn paths_escape_quotes_in_date_keys() {
        let address = ShowAddress {
            date_key: r#"odd"key"#.into(),
            index: 0,
        };
        assert_eq!(
            show_field_path(&address, "bookings"),
            r#"$.shows."odd\"key"[0].bookings"#
        );
    }
}
