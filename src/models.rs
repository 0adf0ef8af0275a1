use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchRequest {
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub filters: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SceneResult {
    pub timestamp: String,
    pub start_time: String,
    pub end_time: String,
    pub confidence: f64,
    pub description: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchResponse {
    pub movie_title: String,
    pub total_scenes: usize,
    pub processing_time: f64,
    pub scenes: Vec<SceneResult>,
}
