use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::discoverdtos::{
        DiscoverGenresData, DiscoverGenresResponseDto, DiscoverListResponseDto, DiscoverMovieData,
        DiscoverMovieResponseDto, DiscoverQueryDto, PageQueryDto,
    },
    error::HttpError,
    services::tmdb::{TmdbClient, TmdbError},
    AppState,
};

pub fn discover_handler() -> Router {
    Router::new()
        .route("/movies", get(discover_movies))
        .route("/movies/popular", get(popular_movies))
        .route("/movies/:movie_id", get(movie_details))
        .route("/genres", get(genre_list))
}

fn tmdb_client(app_state: &AppState) -> Result<&TmdbClient, HttpError> {
    app_state
        .tmdb
        .as_deref()
        .ok_or_else(|| HttpError::server_error("TMDB read token is not configured"))
}

fn map_tmdb_error(err: TmdbError) -> HttpError {
    match err {
        TmdbError::Unauthorized => HttpError::unauthorized(err.to_string()),
        TmdbError::NotFound(_) => HttpError::not_found(err.to_string()),
        TmdbError::Upstream(_) | TmdbError::Network(_) => HttpError::server_error(err.to_string()),
    }
}

pub async fn discover_movies(
    Query(query_params): Query<DiscoverQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let client = tmdb_client(&app_state)?;

    let page = client
        .list_movies(
            query_params.search.as_deref(),
            query_params.filter.as_deref(),
            query_params.sort.as_deref(),
            query_params.page(),
        )
        .await
        .map_err(map_tmdb_error)?;

    Ok(Json(DiscoverListResponseDto {
        status: "success".to_string(),
        data: page,
    }))
}

pub async fn popular_movies(
    Query(query_params): Query<PageQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let client = tmdb_client(&app_state)?;

    let page = client
        .popular_movies(query_params.page())
        .await
        .map_err(map_tmdb_error)?;

    Ok(Json(DiscoverListResponseDto {
        status: "success".to_string(),
        data: page,
    }))
}

pub async fn movie_details(
    Path(movie_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let client = tmdb_client(&app_state)?;

    let movie = client
        .movie_details(movie_id)
        .await
        .map_err(map_tmdb_error)?;

    Ok(Json(DiscoverMovieResponseDto {
        status: "success".to_string(),
        data: DiscoverMovieData { movie },
    }))
}

pub async fn genre_list(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let client = tmdb_client(&app_state)?;

    let genres = client.genre_list().await.map_err(map_tmdb_error)?;

    Ok(Json(DiscoverGenresResponseDto {
        status: "success".to_string(),
        data: DiscoverGenresData { genres },
    }))
}
