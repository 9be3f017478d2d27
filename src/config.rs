#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // AI recommendation provider; the engine falls back to catalog order
    // when the key is absent
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    // TMDB discovery proxy
    pub tmdb_api_base: String,
    pub tmdb_read_token: Option<String>,
    // Optional cache layer
    pub redis_url: Option<String>,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let tmdb_api_base = std::env::var("TMDB_API_BASE")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_read_token = std::env::var("TMDB_READ_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let redis_url = std::env::var("REDIS_URL")
            .ok()
            .filter(|url| !url.is_empty());

        Config {
            database_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().expect("JWT_MAXAGE must be a number"),
            port,
            gemini_api_key,
            gemini_model,
            tmdb_api_base,
            tmdb_read_token,
            redis_url,
        }
    }
}
