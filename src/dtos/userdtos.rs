use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,

    #[serde(rename = "preferredGenres")]
    pub preferred_genres: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdatePreferencesDto {
    #[validate(length(min = 1, message = "Preferred genres must not be empty"))]
    #[serde(rename = "preferredGenres")]
    pub preferred_genres: String,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "preferredGenres")]
    pub preferred_genres: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            preferred_genres: user.preferred_genres.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_dto_rejects_password_mismatch() {
        let dto = RegisterUserDto {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret2".to_string(),
            preferred_genres: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_dto_rejects_short_password() {
        let dto = RegisterUserDto {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "abc".to_string(),
            password_confirm: "abc".to_string(),
            preferred_genres: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_dto_accepts_valid_payload() {
        let dto = RegisterUserDto {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
            preferred_genres: Some("Action, Drama".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn login_dto_rejects_invalid_email() {
        let dto = LoginUserDto {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_user_omits_password() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "hash".to_string(),
            preferred_genres: Some("Action".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let filtered = FilterUserDto::filter_user(&user);
        let json = serde_json::to_value(&filtered).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["preferredGenres"], "Action");
    }
}
