use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::recommendationmodel::RecommendationEntry;

#[async_trait]
pub trait RecommendationExt {
    /// Persists one history row per recommended movie, preserving nothing
    /// about ranking; history is read newest-first.
    async fn save_recommendations(
        &self,
        user_id: Uuid,
        movie_ids: &[i32],
        reason: &str,
    ) -> Result<(), sqlx::Error>;

    async fn get_recommendation_history(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecommendationEntry>, sqlx::Error>;
}

#[async_trait]
impl RecommendationExt for DBClient {
    async fn save_recommendations(
        &self,
        user_id: Uuid,
        movie_ids: &[i32],
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        if movie_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO user_recommendations (user_id, movie_id, reason)
            SELECT $1, unnest($2::int[]), $3
            "#,
        )
        .bind(user_id)
        .bind(movie_ids)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_recommendation_history(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecommendationEntry>, sqlx::Error> {
        sqlx::query_as::<_, RecommendationEntry>(
            r#"
            SELECT
                ur.id, ur.movie_id, ur.reason,
                m.title, m.poster_path, m.genre_ids,
                ur.created_at
            FROM user_recommendations ur
            JOIN movies m ON m.id = ur.movie_id
            WHERE ur.user_id = $1
            ORDER BY ur.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
