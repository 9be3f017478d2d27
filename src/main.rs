mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use crate::services::gemini::GeminiClient;
use crate::services::recommender::{RecommendationEngine, TextGenerator};
use crate::services::tmdb::TmdbClient;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub recommender: Arc<RecommendationEngine>,
    pub tmdb: Option<Arc<TmdbClient>>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client = Arc::new(db_client);

        let generator: Option<Arc<dyn TextGenerator>> =
            config.gemini_api_key.clone().map(|api_key| {
                Arc::new(GeminiClient::new(api_key, config.gemini_model.clone()))
                    as Arc<dyn TextGenerator>
            });
        let recommender = Arc::new(RecommendationEngine::new(generator));

        let tmdb = config.tmdb_read_token.clone().map(|read_token| {
            Arc::new(TmdbClient::new(
                config.tmdb_api_base.clone(),
                read_token,
                db_client.redis_client.clone(),
            ))
        });

        Self {
            env: config,
            db_client,
            recommender,
            tmdb,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = if let Some(ref redis_url) = config.redis_url {
        match DBClient::with_redis(pool.clone(), redis_url).await {
            Ok(client) => {
                if client.is_redis_available() {
                    println!("✅ Redis caching is ACTIVE");
                } else {
                    println!("⚠️  Redis connection failed - Running without cache");
                }
                client
            }
            Err(e) => {
                println!("⚠️  Redis initialization error: {} - Running without cache", e);
                DBClient::new(pool)
            }
        }
    } else {
        println!("ℹ️  Redis not configured - Running without cache (set REDIS_URL to enable)");
        DBClient::new(pool)
    };

    let allowed_origins = vec![
        "http://localhost:5173".parse::<HeaderValue>().unwrap(),
        "http://localhost:3000".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    let app = create_router(app_state.clone()).layer(cors);

    println!("🚀 Server is running on http://localhost:{}", config.port);
    println!("📊 Cache status: {}", app_state.db_client.cache_status());
    if app_state.recommender.has_generator() {
        println!("🤖 AI recommendations: Gemini ({})", config.gemini_model);
    } else {
        println!("ℹ️  GEMINI_API_KEY not set - recommendations use catalog order");
    }

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
