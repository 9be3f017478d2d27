use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermoviemodel::{UserMovie, UserMovieEntry};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AddUserMovieDto {
    #[validate(range(min = 1, message = "movieId is required"))]
    #[serde(rename = "movieId")]
    pub movie_id: i32,

    // "favorite" or "watchlist"; validated in the handler so the caller
    // gets a 400 with a readable message instead of a deserialize error
    #[validate(length(min = 1, message = "type is required"))]
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserMovieQueryDto {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateWatchStatusDto {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserMovieData {
    #[serde(rename = "userMovie")]
    pub user_movie: UserMovie,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserMovieResponseDto {
    pub status: String,
    pub data: UserMovieData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserMovieListData {
    #[serde(rename = "userMovies")]
    pub user_movies: Vec<UserMovieEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserMovieListResponseDto {
    pub status: String,
    pub data: UserMovieListData,
}
