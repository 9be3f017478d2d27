use std::collections::HashMap;
use std::sync::Arc;

use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::db::cache::{CacheHelper, TMDB_GENRE_CACHE_TTL};

const GENRE_CACHE_KEY: &str = "tmdb:genres";

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Invalid TMDB API token")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Network(String),
}

/// Movie payload reshaped from TMDB's wire format into the same field set
/// the local catalog stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub genre_ids: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TmdbPagination {
    pub current_page: u32,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TmdbPage {
    pub movies: Vec<TmdbMovie>,
    pub pagination: TmdbPagination,
}

/// Read-only proxy onto the TMDB v3 API.
pub struct TmdbClient {
    api_base: String,
    read_token: String,
    redis: Option<Arc<ConnectionManager>>,
}

impl TmdbClient {
    pub fn new(
        api_base: String,
        read_token: String,
        redis: Option<Arc<ConnectionManager>>,
    ) -> Self {
        TmdbClient {
            api_base,
            read_token,
            redis,
        }
    }

    /// Search when `search` is present, otherwise discover with the optional
    /// genre filter. The requested page is echoed back in the pagination
    /// block regardless of what TMDB reports.
    pub async fn list_movies(
        &self,
        search: Option<&str>,
        genre_filter: Option<&str>,
        sort: Option<&str>,
        page: u32,
    ) -> Result<TmdbPage, TmdbError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("language", "en-US".to_string()),
            ("include_adult", "false".to_string()),
        ];

        let path = if let Some(query) = search {
            params.push(("query", query.to_string()));
            "/search/movie"
        } else {
            if let Some(genres) = genre_filter {
                params.push(("with_genres", genres.to_string()));
            }
            "/discover/movie"
        };

        if let Some(sort) = sort {
            params.push(("sort_by", sort_param(sort)));
        }

        let body = self.fetch(path, &params).await?;
        Ok(self.build_page(body, page).await)
    }

    pub async fn popular_movies(&self, page: u32) -> Result<TmdbPage, TmdbError> {
        let params = [
            ("page", page.to_string()),
            ("language", "en-US".to_string()),
        ];
        let body = self.fetch("/movie/popular", &params).await?;
        Ok(self.build_page(body, page).await)
    }

    /// Single movie with its videos appended; the first video key becomes a
    /// YouTube trailer link.
    pub async fn movie_details(&self, id: i64) -> Result<TmdbMovie, TmdbError> {
        let path = format!("/movie/{}", id);
        let params = [
            ("language", "en-US".to_string()),
            ("append_to_response", "videos".to_string()),
        ];

        let body = self.fetch(&path, &params).await.map_err(|err| match err {
            TmdbError::NotFound(_) => {
                TmdbError::NotFound(format!("Movie with ID {} not found", id))
            }
            other => other,
        })?;

        Ok(movie_from_value(&body, &HashMap::new()))
    }

    /// Genre id/name catalog, cached in redis for a day when available.
    pub async fn genre_list(&self) -> Result<Vec<TmdbGenre>, TmdbError> {
        if let Some(redis) = &self.redis {
            if let Ok(Some(cached)) = CacheHelper::get::<Vec<TmdbGenre>>(redis, GENRE_CACHE_KEY).await
            {
                return Ok(cached);
            }
        }

        let params = [("language", "en-US".to_string())];
        let body = self.fetch("/genre/movie/list", &params).await?;

        let genres: Vec<TmdbGenre> = body["genres"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|genre| {
                        Some(TmdbGenre {
                            id: genre["id"].as_i64()?,
                            name: genre["name"].as_str()?.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(redis) = &self.redis {
            if let Err(e) =
                CacheHelper::set(redis, GENRE_CACHE_KEY, &genres, TMDB_GENRE_CACHE_TTL).await
            {
                tracing::warn!("Failed to cache TMDB genres: {}", e);
            }
        }

        Ok(genres)
    }

    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value, TmdbError> {
        let url = format!("{}{}", self.api_base, path);

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .bearer_auth(&self.read_token)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| TmdbError::Network(format!("TMDB request failed: {}", e)))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| TmdbError::Network(format!("Invalid TMDB response: {}", e)))?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TmdbError::Unauthorized);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            let message = body["status_message"]
                .as_str()
                .unwrap_or("Resource not found")
                .to_string();
            return Err(TmdbError::NotFound(message));
        }
        if !status.is_success() {
            let message = body["status_message"]
                .as_str()
                .unwrap_or("Error fetching data from TMDB")
                .to_string();
            return Err(TmdbError::Upstream(message));
        }

        Ok(body)
    }

    async fn build_page(&self, body: Value, requested_page: u32) -> TmdbPage {
        // Listing still succeeds when the genre lookup does not
        let genre_names = match self.genre_list().await {
            Ok(list) => list.into_iter().map(|g| (g.id, g.name)).collect(),
            Err(err) => {
                tracing::warn!("TMDB genre lookup failed: {}", err);
                HashMap::new()
            }
        };

        let movies = body["results"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|movie| movie_from_value(movie, &genre_names))
                    .collect()
            })
            .unwrap_or_default();

        TmdbPage {
            movies,
            pagination: TmdbPagination {
                current_page: requested_page,
                total_pages: body["total_pages"].as_i64().unwrap_or(0),
                total_results: body["total_results"].as_i64().unwrap_or(0),
            },
        }
    }
}

/// Maps the public sort vocabulary onto TMDB's `sort_by` fields. A leading
/// `-` selects descending order, unknown fields pass through unchanged.
fn sort_param(sort: &str) -> String {
    let (field, direction) = match sort.strip_prefix('-') {
        Some(rest) => (rest, "desc"),
        None => (sort, "asc"),
    };

    let mapped = match field {
        "title" => "original_title",
        "rating" => "vote_average",
        "year" | "release_date" | "releaseDate" => "primary_release_date",
        "popularity" => "popularity",
        other => other,
    };

    format!("{}.{}", mapped, direction)
}

fn movie_from_value(value: &Value, genre_names: &HashMap<i64, String>) -> TmdbMovie {
    let ids: Vec<i64> = value["genre_ids"]
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_i64).collect())
        .or_else(|| {
            value["genres"]
                .as_array()
                .map(|items| items.iter().filter_map(|g| g["id"].as_i64()).collect())
        })
        .unwrap_or_default();

    let genres: Vec<String> = match value["genres"].as_array() {
        Some(items) => items
            .iter()
            .filter_map(|g| g["name"].as_str().map(String::from))
            .collect(),
        None => ids
            .iter()
            .filter_map(|id| genre_names.get(id).cloned())
            .collect(),
    };

    let genre_ids = ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let trailer_url = value["videos"]["results"][0]["key"]
        .as_str()
        .map(|key| format!("https://www.youtube.com/watch?v={}", key));

    TmdbMovie {
        id: value["id"].as_i64().unwrap_or_default(),
        title: value["title"].as_str().unwrap_or_default().to_string(),
        overview: value["overview"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(String::from),
        poster_path: value["poster_path"].as_str().map(String::from),
        release_date: value["release_date"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(String::from),
        vote_average: value["vote_average"].as_f64(),
        genre_ids,
        genres,
        trailer_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sort_param_maps_public_fields() {
        assert_eq!(sort_param("title"), "original_title.asc");
        assert_eq!(sort_param("-rating"), "vote_average.desc");
        assert_eq!(sort_param("-year"), "primary_release_date.desc");
        assert_eq!(sort_param("release_date"), "primary_release_date.asc");
        assert_eq!(sort_param("popularity"), "popularity.asc");
        assert_eq!(sort_param("-unknown_field"), "unknown_field.desc");
    }

    #[test]
    fn listing_payload_is_reshaped_with_genre_names() {
        let raw = json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker discovers reality is a simulation.",
            "poster_path": "/matrix.jpg",
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "genre_ids": [28, 878]
        });

        let mut names = HashMap::new();
        names.insert(28, "Action".to_string());
        names.insert(878, "Science Fiction".to_string());

        let movie = movie_from_value(&raw, &names);
        assert_eq!(movie.id, 603);
        assert_eq!(movie.genre_ids, "28,878");
        assert_eq!(movie.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(movie.poster_path.as_deref(), Some("/matrix.jpg"));
        assert!(movie.trailer_url.is_none());
    }

    #[test]
    fn detail_payload_uses_embedded_genres_and_videos() {
        let raw = json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "",
            "poster_path": null,
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "genres": [{"id": 28, "name": "Action"}],
            "videos": {"results": [{"key": "vKQi3bBA1y8"}]}
        });

        let movie = movie_from_value(&raw, &HashMap::new());
        assert_eq!(movie.genre_ids, "28");
        assert_eq!(movie.genres, vec!["Action"]);
        assert!(movie.overview.is_none());
        assert!(movie.poster_path.is_none());
        assert_eq!(
            movie.trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=vKQi3bBA1y8")
        );
    }

    #[test]
    fn missing_fields_degrade_to_defaults() {
        let movie = movie_from_value(&json!({}), &HashMap::new());
        assert_eq!(movie.id, 0);
        assert_eq!(movie.title, "");
        assert_eq!(movie.genre_ids, "");
        assert!(movie.genres.is_empty());
        assert!(movie.vote_average.is_none());
    }
}
