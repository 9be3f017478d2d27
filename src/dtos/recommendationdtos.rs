use serde::{Deserialize, Serialize};

use crate::models::{moviemodel::Movie, recommendationmodel::RecommendationEntry};

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationData {
    pub recommendations: Vec<Movie>,
    #[serde(rename = "basedOn")]
    pub based_on: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponseDto {
    pub status: String,
    pub data: RecommendationData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationHistoryData {
    pub history: Vec<RecommendationEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationHistoryResponseDto {
    pub status: String,
    pub data: RecommendationHistoryData,
}
