use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    // Comma-separated genre names, e.g. "Action, Comedy, Drama"
    pub preferred_genres: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Splits the stored preference string into trimmed, non-empty genre names.
    pub fn preference_list(&self) -> Vec<String> {
        self.preferred_genres
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|genre| genre.trim().to_string())
            .filter(|genre| !genre.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_preferences(preferred_genres: Option<&str>) -> User {
        User {
            id: uuid::Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password: "hash".to_string(),
            preferred_genres: preferred_genres.map(|s| s.to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn preference_list_splits_and_trims() {
        let user = user_with_preferences(Some("Action, Comedy ,Drama"));
        assert_eq!(user.preference_list(), vec!["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn preference_list_drops_empty_segments() {
        let user = user_with_preferences(Some("Action,, ,Horror"));
        assert_eq!(user.preference_list(), vec!["Action", "Horror"]);
    }

    #[test]
    fn preference_list_empty_when_unset() {
        assert!(user_with_preferences(None).preference_list().is_empty());
        assert!(user_with_preferences(Some("")).preference_list().is_empty());
    }
}
