use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{
        cache::{CacheHelper, MOVIE_LIST_CACHE_TTL},
        moviedb::MovieExt,
    },
    dtos::moviedtos::{
        CreateMovieDto, GenreListData, GenreListResponseDto, MovieData, MovieListData,
        MovieListQueryDto, MovieListResponseDto, MovieResponseDto, MovieStatsData, MovieStatsDto,
        MovieStatsResponseDto, PaginationDto,
    },
    error::HttpError,
    AppState,
};

pub fn movies_handler() -> Router {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/genres", get(get_genres))
        .route("/stats", get(get_stats))
        .route("/:movie_id", get(get_movie))
}

pub async fn list_movies(
    Query(query_params): Query<MovieListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (order_column, descending) = query_params.order_by().ok_or_else(|| {
        HttpError::bad_request(format!(
            "Cannot order by field '{}'",
            query_params.sort.as_deref().unwrap_or_default()
        ))
    })?;

    let cache_key = format!(
        "movies:list:{}",
        serde_json::to_string(&query_params).unwrap_or_default()
    );

    if let Some(redis) = &app_state.db_client.redis_client {
        if let Ok(Some(cached)) =
            CacheHelper::get::<MovieListResponseDto>(redis, &cache_key).await
        {
            return Ok(Json(cached));
        }
    }

    let movies = app_state
        .db_client
        .get_movies(&query_params, order_column, descending)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total_items = app_state
        .db_client
        .count_movies(&query_params)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = MovieListResponseDto {
        status: "success".to_string(),
        data: MovieListData {
            movies,
            pagination: PaginationDto::new(
                query_params.page_number(),
                query_params.page_size(),
                total_items,
            ),
        },
    };

    if let Some(redis) = &app_state.db_client.redis_client {
        if let Err(e) = CacheHelper::set(redis, &cache_key, &response, MOVIE_LIST_CACHE_TTL).await
        {
            tracing::warn!("Failed to cache movie list: {}", e);
        }
    }

    Ok(Json(response))
}

pub async fn get_movie(
    Path(movie_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let movie = app_state
        .db_client
        .get_movie(movie_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let movie = movie
        .ok_or_else(|| HttpError::not_found(format!("Movie with id {} not found", movie_id)))?;

    Ok(Json(MovieResponseDto {
        status: "success".to_string(),
        data: MovieData { movie },
    }))
}

pub async fn create_movie(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateMovieDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_movie_by_tmdb_id(body.tmdb_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::conflict(
            "A movie with this tmdbId already exists",
        ));
    }

    let movie = app_state
        .db_client
        .save_movie(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(redis) = &app_state.db_client.redis_client {
        if let Err(e) = CacheHelper::invalidate_movie_caches(redis).await {
            tracing::warn!("Failed to invalidate movie caches: {}", e);
        }
    }

    let response = MovieResponseDto {
        status: "success".to_string(),
        data: MovieData { movie },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_genres(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let genres = app_state
        .db_client
        .get_genre_codes()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(GenreListResponseDto {
        status: "success".to_string(),
        data: GenreListData { genres },
    }))
}

pub async fn get_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .get_movie_stats()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MovieStatsResponseDto {
        status: "success".to_string(),
        data: MovieStatsData {
            stats: MovieStatsDto::from_stats(&stats),
        },
    }))
}
