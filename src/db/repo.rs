use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_user_by_id(&self, id: i64) -> DbResult<User>;
    async fn upsert_user(&self, user: &User) -> DbResult<()>;
}

#[async_trait]
pub trait FavoriteRepo: Send + Sync {
    /// Toggle and report the resulting state: true when the movie is now a
    /// favorite, false when the toggle removed it.
    async fn toggle_favorite(&self, favorite: &Favorite) -> DbResult<bool>;
    async fn is_favorite(&self, user_id: i64, movie_id: i64) -> DbResult<bool>;
    async fn list_favorites(&self, user_id: i64) -> DbResult<Vec<Favorite>>;
}
