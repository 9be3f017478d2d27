use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::moviemodel::{Movie, MovieStats};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sortable catalog columns and their leading-dash descending convention
/// (`sort=-rating` means rating, newest-best first).
pub const SORTABLE_FIELDS: &[(&str, &str)] = &[
    ("title", "title"),
    ("rating", "vote_average"),
    ("release_date", "release_date"),
    ("year", "release_date"),
    ("created_at", "created_at"),
];

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct MovieListQueryDto {
    pub search: Option<String>,
    // Genre code to filter on, matched inside the comma-separated genre_ids
    pub filter: Option<String>,
    pub sort: Option<String>,

    #[serde(rename = "minRating")]
    pub min_rating: Option<f64>,
    #[serde(rename = "maxRating")]
    pub max_rating: Option<f64>,
    pub year: Option<i32>,

    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "page[size]")]
    pub page_size: Option<usize>,
    #[validate(range(min = 1))]
    #[serde(rename = "page[number]")]
    pub page_number: Option<usize>,
}

impl MovieListQueryDto {
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn page_number(&self) -> usize {
        self.page_number.unwrap_or(1)
    }

    /// Resolves the sort parameter to a `(column, descending)` pair.
    /// `None` when the field is not sortable; default ordering is
    /// `release_date DESC` when no sort was requested.
    pub fn order_by(&self) -> Option<(&'static str, bool)> {
        let raw = match self.sort.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim(),
            _ => return Some(("release_date", true)),
        };

        let (field, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };

        SORTABLE_FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| (*column, descending))
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateMovieDto {
    #[validate(range(min = 1, message = "tmdbId must be positive"))]
    #[serde(rename = "tmdbId")]
    pub tmdb_id: i64,

    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub overview: Option<String>,

    #[serde(rename = "posterPath")]
    pub poster_path: Option<String>,

    #[serde(rename = "releaseDate")]
    pub release_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, max = 10.0, message = "voteAverage must be between 0 and 10"))]
    #[serde(rename = "voteAverage")]
    pub vote_average: Option<f64>,

    #[serde(rename = "genreIds", default)]
    pub genre_ids: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationDto {
    #[serde(rename = "currentPage")]
    pub current_page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    #[serde(rename = "totalItems")]
    pub total_items: i64,
    #[serde(rename = "itemsPerPage")]
    pub items_per_page: usize,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "hasPreviousPage")]
    pub has_previous_page: bool,
}

impl PaginationDto {
    pub fn new(current_page: usize, items_per_page: usize, total_items: i64) -> Self {
        let total_pages = if items_per_page == 0 {
            0
        } else {
            ((total_items as usize) + items_per_page - 1) / items_per_page
        };

        PaginationDto {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieListData {
    pub movies: Vec<Movie>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieListResponseDto {
    pub status: String,
    pub data: MovieListData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieData {
    pub movie: Movie,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieResponseDto {
    pub status: String,
    pub data: MovieData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenreListData {
    pub genres: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenreListResponseDto {
    pub status: String,
    pub data: GenreListData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieStatsDto {
    #[serde(rename = "totalMovies")]
    pub total_movies: i64,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "oldestMovieDate")]
    pub oldest_movie_date: Option<NaiveDate>,
    #[serde(rename = "newestMovieDate")]
    pub newest_movie_date: Option<NaiveDate>,
}

impl MovieStatsDto {
    pub fn from_stats(stats: &MovieStats) -> Self {
        MovieStatsDto {
            total_movies: stats.total_movies,
            // Two decimal places, matching the public stats contract
            average_rating: stats.average_rating.map(|avg| (avg * 100.0).round() / 100.0),
            oldest_movie_date: stats.oldest_release,
            newest_movie_date: stats.newest_release,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieStatsData {
    pub stats: MovieStatsDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieStatsResponseDto {
    pub status: String,
    pub data: MovieStatsData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_defaults_to_release_date_desc() {
        let query = MovieListQueryDto::default();
        assert_eq!(query.order_by(), Some(("release_date", true)));
    }

    #[test]
    fn order_by_maps_leading_dash_to_descending() {
        let query = MovieListQueryDto {
            sort: Some("-rating".to_string()),
            ..Default::default()
        };
        assert_eq!(query.order_by(), Some(("vote_average", true)));

        let query = MovieListQueryDto {
            sort: Some("title".to_string()),
            ..Default::default()
        };
        assert_eq!(query.order_by(), Some(("title", false)));
    }

    #[test]
    fn order_by_rejects_unknown_fields() {
        let query = MovieListQueryDto {
            sort: Some("password".to_string()),
            ..Default::default()
        };
        assert_eq!(query.order_by(), None);
    }

    #[test]
    fn pagination_math() {
        let page = PaginationDto::new(2, 20, 45);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);
        assert!(page.has_previous_page);

        let last = PaginationDto::new(3, 20, 45);
        assert!(!last.has_next_page);

        let empty = PaginationDto::new(1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
        assert!(!empty.has_previous_page);
    }

    #[test]
    fn stats_rating_rounds_to_two_decimals() {
        let stats = MovieStats {
            total_movies: 3,
            average_rating: Some(7.2466),
            oldest_release: None,
            newest_release: None,
        };
        let dto = MovieStatsDto::from_stats(&stats);
        assert_eq!(dto.average_rating, Some(7.25));
    }

    #[test]
    fn create_movie_dto_validates_rating_range() {
        let dto = CreateMovieDto {
            tmdb_id: 550,
            title: "Fight Club".to_string(),
            vote_average: Some(11.0),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
