use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::models::moviemodel::MovieRef;

/// How many movie ids a recommendation run produces (fewer only when the
/// catalog itself is smaller).
pub const RECOMMENDATION_COUNT: usize = 6;

/// Upper bound on how many catalog entries are offered to the model; both
/// the AI and the fallback draw exclusively from this truncated pool.
pub const CATALOG_POOL_LIMIT: usize = 100;

#[derive(Debug, Error)]
#[error("text generation failed: {0}")]
pub struct TextGenerationError(pub String);

/// Opaque text-completion provider. The engine only cares whether a call
/// succeeded, never why it failed.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, TextGenerationError>;
}

/// Turns genre preferences plus a catalog slice into exactly six ranked
/// movie ids. Total and non-failing: every error path degrades to the
/// deterministic catalog-order fallback.
pub struct RecommendationEngine {
    // None when no AI credential is configured
    generator: Option<Arc<dyn TextGenerator>>,
}

impl RecommendationEngine {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        RecommendationEngine { generator }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Returns at most [`RECOMMENDATION_COUNT`] distinct ids drawn from
    /// `movies`, preserving the model's ranking where one was obtained and
    /// padding from catalog order otherwise. Empty catalog yields an empty
    /// result; the call never returns an error.
    pub async fn generate(&self, preferred_genres: &[String], movies: &[MovieRef]) -> Vec<i32> {
        let pool = &movies[..movies.len().min(CATALOG_POOL_LIMIT)];

        let candidates = match &self.generator {
            Some(generator) => {
                suggested_candidates(generator.as_ref(), preferred_genres, pool).await
            }
            None => {
                tracing::debug!("no text generator configured, serving catalog-order fallback");
                None
            }
        };

        assemble(candidates.unwrap_or_default(), pool)
    }
}

/// Runs the AI call and the lenient parse chain. `None` means the whole AI
/// path produced nothing usable and the caller should fall back.
async fn suggested_candidates(
    generator: &dyn TextGenerator,
    preferred_genres: &[String],
    pool: &[MovieRef],
) -> Option<Vec<Value>> {
    let prompt = build_prompt(preferred_genres, pool);

    let text = match generator.generate_text(&prompt).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("recommendation text generation failed: {}", err);
            return None;
        }
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::warn!("recommendation model returned empty text");
        return None;
    }

    extract_candidates(trimmed)
}

fn build_prompt(preferred_genres: &[String], pool: &[MovieRef]) -> String {
    let preferences = preferred_genres.join(", ");
    let catalog_lines = pool
        .iter()
        .map(|movie| format!("{} | {} | {}", movie.id, movie.title, movie.genre_ids))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "As a movie recommendation system, your task is to select 6 movies that match a user's genre preferences.\n\n\
         User's preferred genres: {preferences}\n\n\
         Available movies (format: id | title | genreIds):\n\
         {catalog_lines}\n\n\
         Instructions:\n\
         1. Choose exactly 6 movies that best match the user's preferred genres\n\
         2. Prioritize movies with genres matching user preferences\n\
         3. Provide diverse recommendations within those genres\n\
         4. Return ONLY the movie IDs as a JSON array with no explanation\n\
         5. Format: [id1, id2, id3, id4, id5, id6]"
    )
}

/// Ordered chain of increasingly lenient extraction attempts. Each tier is
/// consulted only when the previous one yielded nothing.
fn extract_candidates(text: &str) -> Option<Vec<Value>> {
    parse_json_array(text)
        .or_else(|| parse_embedded_array(text))
        .or_else(|| parse_digit_runs(text))
}

/// Tier one: the whole trimmed text is a JSON array. Element validation
/// happens later, so a mixed array like `[1, "two", 3]` stops the chain
/// here. Non-array JSON falls through to the lenient tiers.
fn parse_json_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) if !items.is_empty() => Some(items),
        _ => None,
    }
}

/// Tier two: first bracketed comma-separated integer list embedded in
/// surrounding prose, e.g. `Here you go: [1, 2, 3]`.
fn parse_embedded_array(text: &str) -> Option<Vec<Value>> {
    let pattern = Regex::new(r"\[\s*(?:\d+\s*,\s*)*\d+\s*\]").ok()?;
    let matched = pattern.find(text)?;

    match serde_json::from_str::<Value>(matched.as_str()) {
        Ok(Value::Array(items)) if !items.is_empty() => Some(items),
        _ => None,
    }
}

/// Tier three: scrape every maximal digit run, in order of appearance.
fn parse_digit_runs(text: &str) -> Option<Vec<Value>> {
    let pattern = Regex::new(r"\d+").ok()?;
    let items: Vec<Value> = pattern
        .find_iter(text)
        .filter_map(|run| run.as_str().parse::<i64>().ok())
        .map(Value::from)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Validation, repair and fallback in one place: drops non-integer values,
/// ids outside the pool and duplicates, then pads from catalog order until
/// the result reaches [`RECOMMENDATION_COUNT`] or the pool runs out. Called
/// with an empty candidate list this builds the pure fallback result.
fn assemble(candidates: Vec<Value>, pool: &[MovieRef]) -> Vec<i32> {
    let mut ids: Vec<i32> = Vec::with_capacity(RECOMMENDATION_COUNT);

    for candidate in candidates {
        if ids.len() == RECOMMENDATION_COUNT {
            break;
        }

        let id = match candidate.as_i64().and_then(|raw| i32::try_from(raw).ok()) {
            Some(id) => id,
            None => continue,
        };

        if !pool.iter().any(|movie| movie.id == id) {
            // Hallucinated id: dropped silently, padding restores the length
            continue;
        }

        if ids.contains(&id) {
            continue;
        }

        ids.push(id);
    }

    if ids.len() < RECOMMENDATION_COUNT {
        for movie in pool {
            if ids.len() == RECOMMENDATION_COUNT {
                break;
            }
            if !ids.contains(&movie.id) {
                ids.push(movie.id);
            }
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CannedGenerator {
        text: String,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String, TextGenerationError> {
            Ok(self.text.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String, TextGenerationError> {
            Err(TextGenerationError("connection refused".to_string()))
        }
    }

    struct RecordingGenerator {
        seen_prompt: Mutex<Option<String>>,
        text: String,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String, TextGenerationError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.text.clone())
        }
    }

    fn movie(id: i32, title: &str, genre_ids: &str) -> MovieRef {
        MovieRef {
            id,
            title: title.to_string(),
            genre_ids: genre_ids.to_string(),
        }
    }

    fn catalog() -> Vec<MovieRef> {
        vec![
            movie(1, "Action Movie", "28,12"),
            movie(2, "Comedy Film", "35"),
            movie(3, "Drama Picture", "18"),
            movie(4, "Horror Flick", "27"),
            movie(5, "Sci-Fi Epic", "878"),
            movie(6, "Romance Story", "10749"),
            movie(7, "Thriller Night", "53"),
            movie(8, "Animated Tale", "16,10751"),
        ]
    }

    fn prefs() -> Vec<String> {
        vec![
            "Action".to_string(),
            "Comedy".to_string(),
            "Drama".to_string(),
        ]
    }

    fn engine_with_text(text: &str) -> RecommendationEngine {
        RecommendationEngine::new(Some(Arc::new(CannedGenerator {
            text: text.to_string(),
        })))
    }

    #[tokio::test]
    async fn output_is_bounded_to_six() {
        let engine = engine_with_text("[1, 2, 3, 4, 5, 6, 7, 8]");
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn short_catalog_caps_the_output() {
        let engine = RecommendationEngine::new(Some(Arc::new(FailingGenerator)));
        let short: Vec<MovieRef> = catalog().into_iter().take(3).collect();
        let ids = engine.generate(&prefs(), &short).await;
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_result() {
        let engine = engine_with_text("[1, 2, 3]");
        let ids = engine.generate(&prefs(), &[]).await;
        assert!(ids.is_empty());

        let no_generator = RecommendationEngine::new(None);
        assert!(no_generator.generate(&prefs(), &[]).await.is_empty());
    }

    #[tokio::test]
    async fn every_id_comes_from_the_catalog() {
        let engine = engine_with_text("[99, 2, 1000, 3, -5]");
        let ids = engine.generate(&prefs(), &catalog()).await;
        let known: Vec<i32> = catalog().iter().map(|m| m.id).collect();
        assert!(ids.iter().all(|id| known.contains(id)));
        assert_eq!(ids.len(), 6);
    }

    #[tokio::test]
    async fn duplicate_suggestions_are_dropped() {
        let engine = engine_with_text("[2, 2, 2, 3, 3, 1]");
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![2, 3, 1, 4, 5, 6]);
    }

    #[tokio::test]
    async fn fallback_is_deterministic_for_every_failure_mode() {
        let expected = vec![1, 2, 3, 4, 5, 6];

        let missing_credential = RecommendationEngine::new(None);
        assert_eq!(missing_credential.generate(&prefs(), &catalog()).await, expected);

        let failing_call = RecommendationEngine::new(Some(Arc::new(FailingGenerator)));
        assert_eq!(failing_call.generate(&prefs(), &catalog()).await, expected);

        let empty_text = engine_with_text("   ");
        assert_eq!(empty_text.generate(&prefs(), &catalog()).await, expected);

        let no_numbers = engine_with_text("I cannot pick any movies, sorry!");
        assert_eq!(no_numbers.generate(&prefs(), &catalog()).await, expected);
    }

    #[tokio::test]
    async fn recovers_array_embedded_in_prose() {
        let engine = engine_with_text("Here are your recommendations: [1, 2, 3, 4, 5, 6]");
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn non_numeric_tokens_are_filtered_then_padded() {
        let engine = engine_with_text(r#"[1, "two", 3, null, 5, 6]"#);
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![1, 3, 5, 6, 2, 4]);
    }

    #[tokio::test]
    async fn padding_follows_catalog_order() {
        let engine = engine_with_text("[1, 2, 3]");
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn ai_ranking_is_preserved_and_truncated() {
        let engine = engine_with_text("[8, 7, 6, 5, 4, 3, 2, 1]");
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![8, 7, 6, 5, 4, 3]);
    }

    #[tokio::test]
    async fn digit_runs_are_scraped_from_prose() {
        let engine = engine_with_text("I would pick movie 7 and also movie 8.");
        let ids = engine.generate(&prefs(), &catalog()).await;
        assert_eq!(ids, vec![7, 8, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn json_object_falls_through_to_embedded_list() {
        let engine = engine_with_text(r#"{"ids": [3, 1]}"#);
        let ids = engine.generate(&prefs(), &catalog()).await;
        // Full-text JSON is not an array, the embedded list wins instead
        assert_eq!(ids, vec![3, 1, 2, 4, 5, 6]);
    }

    #[tokio::test]
    async fn catalog_is_truncated_to_the_pool_limit() {
        let big_catalog: Vec<MovieRef> = (1..=150)
            .map(|id| movie(id, &format!("Movie {}", id), "28"))
            .collect();

        // An id valid in the full list but beyond the pool bound is dropped
        let engine = engine_with_text("[150, 1, 2]");
        let ids = engine.generate(&prefs(), &big_catalog).await;
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let recorder = Arc::new(RecordingGenerator {
            seen_prompt: Mutex::new(None),
            text: "[1]".to_string(),
        });
        let engine = RecommendationEngine::new(Some(recorder.clone()));
        engine.generate(&prefs(), &big_catalog).await;

        let prompt = recorder.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("100 | Movie 100 | 28"));
        assert!(!prompt.contains("101 | Movie 101 | 28"));
    }

    #[tokio::test]
    async fn prompt_embeds_preferences_and_catalog_lines() {
        let recorder = Arc::new(RecordingGenerator {
            seen_prompt: Mutex::new(None),
            text: "[1, 2, 3, 4, 5, 6]".to_string(),
        });
        let engine = RecommendationEngine::new(Some(recorder.clone()));
        engine.generate(&prefs(), &catalog()).await;

        let prompt = recorder.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("User's preferred genres: Action, Comedy, Drama"));
        assert!(prompt.contains("1 | Action Movie | 28,12"));
        assert!(prompt.contains("8 | Animated Tale | 16,10751"));
        assert!(prompt.contains("Return ONLY the movie IDs as a JSON array"));
    }

    #[tokio::test]
    async fn empty_preferences_still_produce_a_result() {
        let engine = engine_with_text("[4, 5]");
        let ids = engine.generate(&[], &catalog()).await;
        assert_eq!(ids, vec![4, 5, 1, 2, 3, 6]);
    }

    #[test]
    fn json_array_tier_rejects_non_arrays_and_empties() {
        assert!(parse_json_array(r#"{"a": 1}"#).is_none());
        assert!(parse_json_array("[]").is_none());
        assert!(parse_json_array("42").is_none());
        assert_eq!(parse_json_array("[1, 2]").unwrap().len(), 2);
    }

    #[test]
    fn embedded_array_tier_takes_the_first_match() {
        let items = parse_embedded_array("lists: [4, 5] and [6]").unwrap();
        let ids: Vec<i64> = items.iter().filter_map(|v| v.as_i64()).collect();
        assert_eq!(ids, vec![4, 5]);
        assert!(parse_embedded_array("no brackets here").is_none());
    }

    #[test]
    fn digit_run_tier_collects_in_order_of_appearance() {
        let items = parse_digit_runs("first 12 then 7, later 100").unwrap();
        let ids: Vec<i64> = items.iter().filter_map(|v| v.as_i64()).collect();
        assert_eq!(ids, vec![12, 7, 100]);
        assert!(parse_digit_runs("nothing numeric").is_none());
    }

    #[test]
    fn assemble_with_no_candidates_builds_the_fallback() {
        let ids = assemble(Vec::new(), &catalog());
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let short: Vec<MovieRef> = catalog().into_iter().take(2).collect();
        assert_eq!(assemble(Vec::new(), &short), vec![1, 2]);
    }
}
