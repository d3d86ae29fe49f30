use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created: Option<String>,
}

/// A favorited movie. The toggle request carries the full denormalized
/// movie row and it is stored as sent, so favorites survive dataset swaps.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Favorite {
    pub user_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub overview: String,
    pub genres: String,
    pub year: Option<i32>,
    pub rating: f64,
    pub poster_url: String,
    pub created: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;
