use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::User;

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
        preferred_genres: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_preferences(
        &self,
        user_id: Uuid,
        preferred_genres: String,
        name: Option<String>,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, password, preferred_genres, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, password, preferred_genres, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
        preferred_genres: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, preferred_genres)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password, preferred_genres, created_at, updated_at
            "#,
        )
        .bind(name.into())
        .bind(email.into())
        .bind(password.into())
        .bind(preferred_genres)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_preferences(
        &self,
        user_id: Uuid,
        preferred_genres: String,
        name: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET preferred_genres = $2,
                name = COALESCE($3, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password, preferred_genres, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(preferred_genres)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }
}
