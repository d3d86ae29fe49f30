use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::model::*;
use super::repo::*;

/// The single seeded account favorites are recorded against until the app
/// grows real logins.
pub const DEFAULT_USER_ID: i64 = 1;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init_schema().await?;
        repo.seed_default_user().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    async fn seed_default_user(&self) -> DbResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO users (id, username, email, created) VALUES (?, ?, ?, ?)",
        )
        .bind(DEFAULT_USER_ID)
        .bind("demo_user")
        .bind("demo@cinematch.local")
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepo for SqliteRepository {
    async fn get_user_by_id(&self, id: i64) -> DbResult<User> {
        sqlx::query_as::<_, User>("SELECT id, username, email, created FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => DbError::NotFound(format!("User not found: {}", id)),
                _ => DbError::Sqlx(e),
            })
    }

    async fn upsert_user(&self, user: &User) -> DbResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO users (id, username, email, created) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl FavoriteRepo for SqliteRepository {
    async fn toggle_favorite(&self, favorite: &Favorite) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM favorites WHERE user_id = ? AND movie_id = ?")
                .bind(favorite.user_id)
                .bind(favorite.movie_id)
                .fetch_optional(&mut *tx)
                .await?;

        let favorited = if existing.is_some() {
            sqlx::query("DELETE FROM favorites WHERE user_id = ? AND movie_id = ?")
                .bind(favorite.user_id)
                .bind(favorite.movie_id)
                .execute(&mut *tx)
                .await?;
            false
        } else {
            sqlx::query(
                "INSERT INTO favorites
                (user_id, movie_id, movie_title, overview, genres, year, rating, poster_url, created)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(favorite.user_id)
            .bind(favorite.movie_id)
            .bind(&favorite.movie_title)
            .bind(&favorite.overview)
            .bind(&favorite.genres)
            .bind(favorite.year)
            .bind(favorite.rating)
            .bind(&favorite.poster_url)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;
            true
        };

        tx.commit().await?;
        Ok(favorited)
    }

    async fn is_favorite(&self, user_id: i64, movie_id: i64) -> DbResult<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM favorites WHERE user_id = ? AND movie_id = ?")
                .bind(user_id)
                .bind(movie_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    async fn list_favorites(&self, user_id: i64) -> DbResult<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT user_id, movie_id, movie_title, overview, genres, year, rating, poster_url, created
             FROM favorites WHERE user_id = ? ORDER BY created DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }
}
