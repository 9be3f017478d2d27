use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::{moviedb::MovieExt, recommendationdb::RecommendationExt},
    dtos::recommendationdtos::{
        RecommendationData, RecommendationHistoryData, RecommendationHistoryResponseDto,
        RecommendationResponseDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

const HISTORY_LIMIT: i64 = 50;

pub fn recommendations_handler() -> Router {
    Router::new()
        .route("/", get(get_recommendations))
        .route("/history", get(get_history))
}

pub async fn get_recommendations(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let preferences = user.user.preference_list();
    if preferences.is_empty() {
        return Err(HttpError::bad_request(
            "Please set your preferred genres first",
        ));
    }

    let catalog = app_state
        .db_client
        .get_movie_refs()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if catalog.is_empty() {
        return Ok(Json(RecommendationResponseDto {
            status: "success".to_string(),
            data: RecommendationData {
                recommendations: Vec::new(),
                based_on: preferences,
                total: 0,
            },
        }));
    }

    let ids = app_state.recommender.generate(&preferences, &catalog).await;

    let recommendations = app_state
        .db_client
        .get_movies_by_ids(&ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // History is best effort; a failed write never blocks the response
    let reason = format!("Matched preferred genres: {}", preferences.join(", "));
    if let Err(e) = app_state
        .db_client
        .save_recommendations(user.user.id, &ids, &reason)
        .await
    {
        tracing::warn!("Failed to record recommendation history: {}", e);
    }

    let total = recommendations.len();

    Ok(Json(RecommendationResponseDto {
        status: "success".to_string(),
        data: RecommendationData {
            recommendations,
            based_on: preferences,
            total,
        },
    }))
}

pub async fn get_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let history = app_state
        .db_client
        .get_recommendation_history(user.user.id, HISTORY_LIMIT)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(RecommendationHistoryResponseDto {
        status: "success".to_string(),
        data: RecommendationHistoryData { history },
    }))
}
