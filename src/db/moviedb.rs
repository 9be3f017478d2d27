use async_trait::async_trait;

use super::cache::{CacheHelper, MOVIE_STATS_CACHE_TTL};
use super::db::DBClient;
use crate::dtos::moviedtos::{CreateMovieDto, MovieListQueryDto};
use crate::models::moviemodel::{Movie, MovieRef, MovieStats};

const MOVIE_COLUMNS: &str =
    "id, tmdb_id, title, overview, poster_path, release_date, vote_average, genre_ids, created_at, updated_at";

#[async_trait]
pub trait MovieExt {
    async fn save_movie(&self, movie: &CreateMovieDto) -> Result<Movie, sqlx::Error>;

    async fn get_movie(&self, movie_id: i32) -> Result<Option<Movie>, sqlx::Error>;

    /// Duplicate check before insert; tmdb_id is unique in the catalog.
    async fn get_movie_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<Movie>, sqlx::Error>;

    async fn get_movies(
        &self,
        query: &MovieListQueryDto,
        order_column: &str,
        descending: bool,
    ) -> Result<Vec<Movie>, sqlx::Error>;

    async fn count_movies(&self, query: &MovieListQueryDto) -> Result<i64, sqlx::Error>;

    /// Distinct genre codes across the catalog, ascending.
    async fn get_genre_codes(&self) -> Result<Vec<i32>, sqlx::Error>;

    async fn get_movie_stats(&self) -> Result<MovieStats, sqlx::Error>;

    /// Catalog snapshot for the recommendation engine, most recent first.
    async fn get_movie_refs(&self) -> Result<Vec<MovieRef>, sqlx::Error>;

    /// Resolves ids to full rows, preserving the order of `movie_ids`.
    async fn get_movies_by_ids(&self, movie_ids: &[i32]) -> Result<Vec<Movie>, sqlx::Error>;
}

// Shared WHERE clause for list and count; placeholders $1..$5
const MOVIE_FILTERS: &str = r#"
    ($1::text IS NULL OR title ILIKE $1)
    AND ($2::text IS NULL OR $2 = ANY(SELECT trim(g) FROM unnest(string_to_array(genre_ids, ',')) AS g))
    AND ($3::float8 IS NULL OR vote_average >= $3)
    AND ($4::float8 IS NULL OR vote_average <= $4)
    AND ($5::int IS NULL OR (release_date >= make_date($5, 1, 1) AND release_date <= make_date($5, 12, 31)))
"#;

fn search_pattern(query: &MovieListQueryDto) -> Option<String> {
    query
        .search
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("%{}%", s.trim()))
}

fn genre_filter(query: &MovieListQueryDto) -> Option<String> {
    query
        .filter
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .map(|f| f.trim().to_string())
}

#[async_trait]
impl MovieExt for DBClient {
    async fn save_movie(&self, movie: &CreateMovieDto) -> Result<Movie, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (tmdb_id, title, overview, poster_path, release_date, vote_average, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(movie.tmdb_id)
        .bind(&movie.title)
        .bind(&movie.overview)
        .bind(&movie.poster_path)
        .bind(movie.release_date)
        .bind(movie.vote_average)
        .bind(&movie.genre_ids)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_movie(&self, movie_id: i32) -> Result<Option<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE id = $1
            "#
        ))
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_movie_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE tmdb_id = $1
            "#
        ))
        .bind(tmdb_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_movies(
        &self,
        query: &MovieListQueryDto,
        order_column: &str,
        descending: bool,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let direction = if descending { "DESC" } else { "ASC" };
        let limit = query.page_size();
        let offset = limit * (query.page_number().saturating_sub(1));

        // order_column comes from the SORTABLE_FIELDS whitelist, never user input
        let sql = format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE {MOVIE_FILTERS}
            ORDER BY {order_column} {direction} NULLS LAST
            LIMIT $6 OFFSET $7
            "#
        );

        sqlx::query_as::<_, Movie>(&sql)
            .bind(search_pattern(query))
            .bind(genre_filter(query))
            .bind(query.min_rating)
            .bind(query.max_rating)
            .bind(query.year)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_movies(&self, query: &MovieListQueryDto) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM movies WHERE {MOVIE_FILTERS}");

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(search_pattern(query))
            .bind(genre_filter(query))
            .bind(query.min_rating)
            .bind(query.max_rating)
            .bind(query.year)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_genre_codes(&self) -> Result<Vec<i32>, sqlx::Error> {
        let raw_codes = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT trim(g) AS code
            FROM movies, unnest(string_to_array(genre_ids, ',')) AS g
            WHERE trim(g) <> ''
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut codes: Vec<i32> = raw_codes
            .iter()
            .filter_map(|code| code.parse::<i32>().ok())
            .collect();
        codes.sort_unstable();
        codes.dedup();

        Ok(codes)
    }

    async fn get_movie_stats(&self) -> Result<MovieStats, sqlx::Error> {
        if let Some(redis) = &self.redis_client {
            if let Ok(Some(cached)) = CacheHelper::get::<MovieStats>(redis, "movies:stats").await {
                return Ok(cached);
            }
        }

        let stats = sqlx::query_as::<_, MovieStats>(
            r#"
            SELECT
                COUNT(*) AS total_movies,
                AVG(vote_average) AS average_rating,
                MIN(release_date) AS oldest_release,
                MAX(release_date) AS newest_release
            FROM movies
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        if let Some(redis) = &self.redis_client {
            let _ = CacheHelper::set(redis, "movies:stats", &stats, MOVIE_STATS_CACHE_TTL).await;
        }

        Ok(stats)
    }

    async fn get_movie_refs(&self) -> Result<Vec<MovieRef>, sqlx::Error> {
        sqlx::query_as::<_, MovieRef>(
            r#"
            SELECT id, title, genre_ids
            FROM movies
            ORDER BY release_date DESC NULLS LAST, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_movies_by_ids(&self, movie_ids: &[i32]) -> Result<Vec<Movie>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Movie>(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE id = ANY($1)
            "#
        ))
        .bind(movie_ids)
        .fetch_all(&self.pool)
        .await?;

        // ANY() loses the caller's ranking; restore it
        let mut ordered = Vec::with_capacity(rows.len());
        for id in movie_ids {
            if let Some(movie) = rows.iter().find(|m| m.id == *id) {
                ordered.push(movie.clone());
            }
        }

        Ok(ordered)
    }
}
