use async_trait::async_trait;
use serde_json::json;

use crate::services::recommender::{TextGenerationError, TextGenerator};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text-completion provider backed by the Google Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        GeminiClient { api_key, model }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| TextGenerationError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TextGenerationError(format!(
                "Gemini API returned status {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TextGenerationError(format!("invalid response body: {}", e)))?;

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| TextGenerationError("no response text from Gemini API".to_string()))?;

        Ok(text.to_string())
    }
}
