//! Variety generation for dishes the catalogue does not know.
//!
//! The search flow only reaches a generator after both local matchers come up
//! empty. Real implementations call a remote model; this crate ships a fake
//! for tests, an offline generator that always declines, and a disk cache
//! that can wrap either.

mod caching;
mod fake;

pub use caching::{CacheStats, CachingGenerator};
pub use fake::FakeGenerator;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::catalogue::VarietyRecord;
use crate::config::{GeneratorKind, TadkaConfig};

/// Error type for variety generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse generated varieties: {0}")]
    ParseError(String),

    #[error("Generator not configured: {0}")]
    NotConfigured(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

/// Source of varieties for dishes outside the catalogue.
///
/// Implementations must be thread-safe. Returned varieties usually have no
/// diet tag.
#[async_trait]
pub trait VarietyGenerator: Send + Sync + fmt::Debug {
    /// Generate varieties for a dish name as typed by the user.
    async fn generate(&self, dish_name: &str) -> Result<Vec<VarietyRecord>, GeneratorError>;

    /// Short name for logs and cache paths (e.g. "fake", "offline").
    fn generator_name(&self) -> &'static str;
}

/// Generator that never produces anything.
///
/// Used when no remote generator is configured, so the search flow falls
/// through to its generic suggestions.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

#[async_trait]
impl VarietyGenerator for OfflineGenerator {
    async fn generate(&self, _dish_name: &str) -> Result<Vec<VarietyRecord>, GeneratorError> {
        Err(GeneratorError::NotConfigured(
            "offline mode, no variety generator available".to_string(),
        ))
    }

    fn generator_name(&self) -> &'static str {
        "offline"
    }
}

/// Response format expected from a model asked for dish varieties.
#[derive(Debug, Deserialize)]
struct GeneratedVarieties {
    #[allow(dead_code)]
    #[serde(default)]
    dish_name: Option<String>,
    varieties: Vec<GeneratedVariety>,
}

#[derive(Debug, Deserialize)]
struct GeneratedVariety {
    variety_name: String,
    #[serde(default)]
    short_description: String,
}

/// Parse a model's variety response.
///
/// Accepts the JSON object on its own or wrapped in a Markdown code fence.
/// Varieties with a blank name are skipped.
pub fn parse_generated_varieties(content: &str) -> Result<Vec<VarietyRecord>, GeneratorError> {
    let cleaned = strip_code_fence(content);

    let response: GeneratedVarieties = serde_json::from_str(&cleaned)
        .map_err(|e| GeneratorError::ParseError(format!("Invalid varieties JSON: {}", e)))?;

    Ok(response
        .varieties
        .into_iter()
        .filter(|v| !v.variety_name.trim().is_empty())
        .map(|v| VarietyRecord::untagged(v.variety_name.trim(), v.short_description.trim()))
        .collect())
}

/// Markdown fence markers, with an optional `json` info string and newline.
static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\n?").expect("Invalid code fence regex"));

fn strip_code_fence(content: &str) -> Cow<'_, str> {
    match CODE_FENCE_REGEX.replace_all(content.trim(), "") {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}

/// Build the generator selected by configuration, wrapped in a disk cache
/// unless caching is disabled.
pub fn create_generator_from_env(config: &TadkaConfig) -> Box<dyn VarietyGenerator> {
    let inner: Box<dyn VarietyGenerator> = match config.generator {
        GeneratorKind::Offline => Box::new(OfflineGenerator),
        GeneratorKind::Fake => Box::new(FakeGenerator::with_demo_responses()),
    };

    if config.cache_enabled {
        Box::new(CachingGenerator::new(inner, config.cache_dir.clone()))
    } else {
        inner
    }
}
