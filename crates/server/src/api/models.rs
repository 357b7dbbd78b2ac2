//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling via Axum.

use pantry_core::config;
use pantry_core::document::Recipe;
use pantry_core::search::{RecipeFilters, ScoredDocument};
use serde::{Deserialize, Serialize};

/// Request body for `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    /// Dietary tags; a recipe matching any of them is kept.
    #[serde(default)]
    pub diet: Option<Vec<String>>,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Cooking time ceiling in minutes. 0 disables the filter.
    #[serde(default)]
    pub max_time: Option<u32>,
}

fn default_top_k() -> usize {
    config::DEFAULT_TOP_K
}
fn default_alpha() -> f32 {
    config::DEFAULT_ALPHA
}

impl SearchRequest {
    pub fn filters(&self) -> RecipeFilters {
        RecipeFilters {
            diet: self.diet.clone().unwrap_or_default(),
            cuisine: self.cuisine.clone(),
            max_minutes: self.max_time,
        }
    }
}

/// One ranked recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResult {
    pub id: u64,
    pub name: String,
    pub minutes: u32,
    pub tags: String,
    pub score: f32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub description: String,
}

impl From<&ScoredDocument> for RecipeResult {
    fn from(sd: &ScoredDocument) -> Self {
        let Recipe {
            id,
            name,
            minutes,
            tags,
            description,
            ingredients,
            steps,
        } = sd.recipe.as_ref();
        Self {
            id: *id,
            name: name.clone(),
            minutes: *minutes,
            tags: tags.clone(),
            score: sd.score,
            ingredients: ingredients.clone(),
            steps: steps.clone(),
            description: description.clone(),
        }
    }
}

/// Response body for `POST /search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RecipeResult>,
    pub count: usize,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `initializing`, `ok`, or `failed`.
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub documents: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Response body for `GET /stats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub documents: u32,
    pub lexical_vocabulary: usize,
    pub bm25_vocabulary: usize,
    pub average_token_length: f32,
    pub k1: f32,
    pub b: f32,
    pub bm25_source: String,
    pub source_tokens_retained: bool,
}
