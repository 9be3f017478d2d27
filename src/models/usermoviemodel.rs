use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_movie_kind", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum UserMovieKind {
    Favorite,
    Watchlist,
}

impl UserMovieKind {
    pub fn to_str(&self) -> &str {
        match self {
            UserMovieKind::Favorite => "favorite",
            UserMovieKind::Watchlist => "watchlist",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "favorite" => Some(UserMovieKind::Favorite),
            "watchlist" => Some(UserMovieKind::Watchlist),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "watch_status", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Pending,
    Watched,
}

impl WatchStatus {
    pub fn to_str(&self) -> &str {
        match self {
            WatchStatus::Pending => "pending",
            WatchStatus::Watched => "watched",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(WatchStatus::Pending),
            "watched" => Some(WatchStatus::Watched),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct UserMovie {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub movie_id: i32,
    pub kind: UserMovieKind,
    // NULL for favorites; watchlist entries start as pending
    pub status: Option<WatchStatus>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// List row joined with its movie snapshot.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct UserMovieEntry {
    pub id: uuid::Uuid,
    pub movie_id: i32,
    pub kind: UserMovieKind,
    pub status: Option<WatchStatus>,
    pub title: String,
    pub overview: Option<String>,
    #[serde(rename = "posterPath")]
    pub poster_path: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<chrono::NaiveDate>,
    #[serde(rename = "genreIds")]
    pub genre_ids: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!(UserMovieKind::from_str("favorite"), Some(UserMovieKind::Favorite));
        assert_eq!(UserMovieKind::from_str("watchlist"), Some(UserMovieKind::Watchlist));
        assert_eq!(UserMovieKind::Favorite.to_str(), "favorite");
        assert!(UserMovieKind::from_str("queue").is_none());
    }

    #[test]
    fn status_round_trips_through_str() {
        assert_eq!(WatchStatus::from_str("pending"), Some(WatchStatus::Pending));
        assert_eq!(WatchStatus::from_str("watched"), Some(WatchStatus::Watched));
        assert!(WatchStatus::from_str("seen").is_none());
    }
}
