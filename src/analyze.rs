use crate::models::SceneResult;
use crate::thumbnail::thumbnail_url;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Category vocabulary. Declaration order is the priority order: the first
/// category with a keyword hit wins, so reordering changes tie-breaks.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "action",
        &["fight", "battle", "chase", "explosion", "combat", "punch"],
    ),
    ("romance", &["kiss", "love", "romance", "hug", "proposal"]),
    ("drama", &["argument", "confession", "emotional", "crying"]),
    ("comedy", &["joke", "funny", "laugh", "comedy", "prank"]),
];

const BASE_CONFIDENCE: f64 = 0.8;
const MATCH_BONUS: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.9;
const ALTERNATE_PENALTY: f64 = 0.15;

const FIRST_SCENE_START: &str = "00:15:30";
const FIRST_SCENE_END: &str = "00:18:45";
const SECOND_SCENE_START: &str = "01:22:15";
const SECOND_SCENE_END: &str = "01:25:30";

#[async_trait]
pub trait SceneAnalyzer: Send + Sync {
    async fn analyze(&self, description: &str, url: &str) -> Result<Vec<SceneResult>>;
}

/// Keyword-lookup stand-in for a real scene model. The delay simulates
/// inference latency; tests inject `Duration::ZERO`.
pub struct KeywordAnalyzer {
    delay: Duration,
}

impl KeywordAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SceneAnalyzer for KeywordAnalyzer {
    async fn analyze(&self, description: &str, url: &str) -> Result<Vec<SceneResult>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let (category, confidence) = categorize(description);
        debug!("Categorized description as '{}' ({})", category, confidence);
        Ok(synthesize_scenes(category, confidence, url))
    }
}

/// Maps a free-text description to a category label and confidence.
/// First-match policy over `CATEGORIES`; no hit falls through to `general`.
pub fn categorize(description: &str) -> (&'static str, f64) {
    let desc_lower = description.to_lowercase();
    for (category, keywords) in CATEGORIES {
        if keywords.iter().any(|word| desc_lower.contains(word)) {
            return (category, (BASE_CONFIDENCE + MATCH_BONUS).min(MAX_CONFIDENCE));
        }
    }
    ("general", BASE_CONFIDENCE)
}

/// Produces the two placeholder scene records for a categorized request.
/// The alternate scene's confidence is docked by a fixed penalty, floored
/// at zero.
pub fn synthesize_scenes(category: &str, confidence: f64, url: &str) -> Vec<SceneResult> {
    let thumb = thumbnail_url(url);
    let thumbnail = (!thumb.is_empty()).then_some(thumb);

    vec![
        SceneResult {
            timestamp: FIRST_SCENE_START.to_string(),
            start_time: FIRST_SCENE_START.to_string(),
            end_time: FIRST_SCENE_END.to_string(),
            confidence,
            description: format!("{} scene matching your description", title_case(category)),
            thumbnail: thumbnail.clone(),
        },
        SceneResult {
            timestamp: SECOND_SCENE_START.to_string(),
            start_time: SECOND_SCENE_START.to_string(),
            end_time: SECOND_SCENE_END.to_string(),
            confidence: (confidence - ALTERNATE_PENALTY).max(0.0),
            description: format!("Alternate {category} sequence"),
            thumbnail,
        },
    ]
}

/// Drops scenes below `min_confidence` when the filter map carries that key.
/// Any other filter key is ignored.
pub fn apply_filters(scenes: &mut Vec<SceneResult>, filters: Option<&HashMap<String, Value>>) {
    let Some(filters) = filters else { return };
    for key in filters.keys() {
        if key != "min_confidence" {
            debug!("Ignoring unrecognized filter key '{}'", key);
        }
    }
    let min_confidence = filters
        .get("min_confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    scenes.retain(|scene| scene.confidence >= min_confidence);
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
