use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Movie {
    pub id: i32,
    pub tmdb_id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    // Comma-separated TMDB genre codes, e.g. "28,12,878"
    pub genre_ids: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Catalog snapshot consumed by the recommendation engine. Identity is `id`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct MovieRef {
    pub id: i32,
    pub title: String,
    pub genre_ids: String,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct MovieStats {
    pub total_movies: i64,
    pub average_rating: Option<f64>,
    pub oldest_release: Option<NaiveDate>,
    pub newest_release: Option<NaiveDate>,
}
