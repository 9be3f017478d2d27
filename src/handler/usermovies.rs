use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{moviedb::MovieExt, usermoviedb::UserMovieExt},
    dtos::{
        userdtos::Response,
        usermoviedtos::{
            AddUserMovieDto, UpdateWatchStatusDto, UserMovieData, UserMovieListData,
            UserMovieListResponseDto, UserMovieQueryDto, UserMovieResponseDto,
        },
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::usermoviemodel::{UserMovieKind, WatchStatus},
    AppState,
};

pub fn user_movies_handler() -> Router {
    Router::new()
        .route("/", get(list_user_movies).post(add_user_movie))
        .route("/:id", patch(update_watch_status).delete(remove_user_movie))
}

pub async fn add_user_movie(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<AddUserMovieDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let kind = UserMovieKind::from_str(&body.kind).ok_or_else(|| {
        HttpError::bad_request("Type must be either 'favorite' or 'watchlist'")
    })?;

    let movie = app_state
        .db_client
        .get_movie(body.movie_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if movie.is_none() {
        return Err(HttpError::not_found(format!(
            "Movie with id {} not found",
            body.movie_id
        )));
    }

    let existing = app_state
        .db_client
        .find_user_movie(user.user.id, body.movie_id, kind)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request(format!(
            "Movie already in your {}",
            kind.to_str()
        )));
    }

    // Watchlist entries track watch progress; favorites have no status
    let status = match kind {
        UserMovieKind::Watchlist => Some(WatchStatus::Pending),
        UserMovieKind::Favorite => None,
    };

    let user_movie = app_state
        .db_client
        .add_user_movie(user.user.id, body.movie_id, kind, status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = UserMovieResponseDto {
        status: "success".to_string(),
        data: UserMovieData { user_movie },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_user_movies(
    Query(query_params): Query<UserMovieQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let kind = match query_params.kind.as_deref() {
        Some(raw) => Some(UserMovieKind::from_str(raw).ok_or_else(|| {
            HttpError::bad_request("Type must be either 'favorite' or 'watchlist'")
        })?),
        None => None,
    };

    let status = match query_params.status.as_deref() {
        Some(raw) => Some(WatchStatus::from_str(raw).ok_or_else(|| {
            HttpError::bad_request("Status must be either 'pending' or 'watched'")
        })?),
        None => None,
    };

    let user_movies = app_state
        .db_client
        .get_user_movies(user.user.id, kind, status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserMovieListResponseDto {
        status: "success".to_string(),
        data: UserMovieListData { user_movies },
    }))
}

pub async fn update_watch_status(
    Path(id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateWatchStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.status != "watched" {
        return Err(HttpError::bad_request(
            "Status can only be updated to 'watched'",
        ));
    }

    let updated = app_state
        .db_client
        .update_watch_status(id, user.user.id, WatchStatus::Watched)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user_movie = updated
        .ok_or_else(|| HttpError::not_found("Movie not found in your watchlist"))?;

    Ok(Json(UserMovieResponseDto {
        status: "success".to_string(),
        data: UserMovieData { user_movie },
    }))
}

pub async fn remove_user_movie(
    Path(id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let rows_deleted = app_state
        .db_client
        .delete_user_movie(id, user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if rows_deleted == 0 {
        return Err(HttpError::not_found("User movie entry not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Movie removed from your list".to_string(),
    }))
}
