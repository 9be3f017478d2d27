use serde::{Deserialize, Serialize};

use crate::services::tmdb::{TmdbGenre, TmdbMovie, TmdbPage};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DiscoverQueryDto {
    pub search: Option<String>,
    // Genre code(s) forwarded to TMDB's with_genres
    pub filter: Option<String>,
    pub sort: Option<String>,

    #[serde(rename = "page[number]")]
    pub page_number: Option<u32>,
}

impl DiscoverQueryDto {
    pub fn page(&self) -> u32 {
        self.page_number.filter(|p| *p >= 1).unwrap_or(1)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQueryDto {
    #[serde(rename = "page[number]")]
    pub page_number: Option<u32>,
}

impl PageQueryDto {
    pub fn page(&self) -> u32 {
        self.page_number.filter(|p| *p >= 1).unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
pub struct DiscoverListResponseDto {
    pub status: String,
    pub data: TmdbPage,
}

#[derive(Debug, Serialize)]
pub struct DiscoverMovieData {
    pub movie: TmdbMovie,
}

#[derive(Debug, Serialize)]
pub struct DiscoverMovieResponseDto {
    pub status: String,
    pub data: DiscoverMovieData,
}

#[derive(Debug, Serialize)]
pub struct DiscoverGenresData {
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Serialize)]
pub struct DiscoverGenresResponseDto {
    pub status: String,
    pub data: DiscoverGenresData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(DiscoverQueryDto::default().page(), 1);

        let query = DiscoverQueryDto {
            page_number: Some(0),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);

        let query = DiscoverQueryDto {
            page_number: Some(3),
            ..Default::default()
        };
        assert_eq!(query.page(), 3);
    }
}
