use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// History row joined with its movie snapshot.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct RecommendationEntry {
    pub id: uuid::Uuid,
    pub movie_id: i32,
    pub reason: Option<String>,
    pub title: String,
    #[serde(rename = "posterPath")]
    pub poster_path: Option<String>,
    #[serde(rename = "genreIds")]
    pub genre_ids: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
