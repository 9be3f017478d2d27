use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, discover::discover_handler, movies::movies_handler,
        recommendations::recommendations_handler, usermovies::user_movies_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .route("/healthcheck", get(health_check))
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/movies", movies_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/user-movies",
            user_movies_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/recommendations",
            recommendations_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/pub", discover_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new().nest("/api", api_route)
}
