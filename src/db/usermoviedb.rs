use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermoviemodel::{UserMovie, UserMovieEntry, UserMovieKind, WatchStatus};

const USER_MOVIE_COLUMNS: &str = "id, user_id, movie_id, kind, status, created_at, updated_at";

#[async_trait]
pub trait UserMovieExt {
    async fn add_user_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
        kind: UserMovieKind,
        status: Option<WatchStatus>,
    ) -> Result<UserMovie, sqlx::Error>;

    /// Duplicate check for (user, movie, list) before insert.
    async fn find_user_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
        kind: UserMovieKind,
    ) -> Result<Option<UserMovie>, sqlx::Error>;

    async fn get_user_movies(
        &self,
        user_id: Uuid,
        kind: Option<UserMovieKind>,
        status: Option<WatchStatus>,
    ) -> Result<Vec<UserMovieEntry>, sqlx::Error>;

    /// Marks a watchlist entry; favorites have no status to update.
    async fn update_watch_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: WatchStatus,
    ) -> Result<Option<UserMovie>, sqlx::Error>;

    async fn delete_user_movie(&self, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl UserMovieExt for DBClient {
    async fn add_user_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
        kind: UserMovieKind,
        status: Option<WatchStatus>,
    ) -> Result<UserMovie, sqlx::Error> {
        sqlx::query_as::<_, UserMovie>(&format!(
            r#"
            INSERT INTO user_movies (user_id, movie_id, kind, status)
            VALUES ($1, $2, $3::user_movie_kind, $4::watch_status)
            RETURNING {USER_MOVIE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(movie_id)
        .bind(kind.to_str())
        .bind(status.map(|s| s.to_str().to_string()))
        .fetch_one(&self.pool)
        .await
    }

    async fn find_user_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
        kind: UserMovieKind,
    ) -> Result<Option<UserMovie>, sqlx::Error> {
        sqlx::query_as::<_, UserMovie>(&format!(
            r#"
            SELECT {USER_MOVIE_COLUMNS}
            FROM user_movies
            WHERE user_id = $1 AND movie_id = $2 AND kind = $3::user_movie_kind
            "#
        ))
        .bind(user_id)
        .bind(movie_id)
        .bind(kind.to_str())
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_movies(
        &self,
        user_id: Uuid,
        kind: Option<UserMovieKind>,
        status: Option<WatchStatus>,
    ) -> Result<Vec<UserMovieEntry>, sqlx::Error> {
        sqlx::query_as::<_, UserMovieEntry>(
            r#"
            SELECT
                um.id, um.movie_id, um.kind, um.status,
                m.title, m.overview, m.poster_path, m.release_date, m.genre_ids,
                um.created_at
            FROM user_movies um
            JOIN movies m ON m.id = um.movie_id
            WHERE um.user_id = $1
            AND ($2::text IS NULL OR um.kind = $2::user_movie_kind)
            AND ($3::text IS NULL OR um.status = $3::watch_status)
            ORDER BY um.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(kind.map(|k| k.to_str().to_string()))
        .bind(status.map(|s| s.to_str().to_string()))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_watch_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: WatchStatus,
    ) -> Result<Option<UserMovie>, sqlx::Error> {
        sqlx::query_as::<_, UserMovie>(&format!(
            r#"
            UPDATE user_movies
            SET status = $3::watch_status,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND kind = 'watchlist'::user_movie_kind
            RETURNING {USER_MOVIE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(status.to_str())
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user_movie(&self, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_movies
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
