//! Caching wrapper for variety generators.
//!
//! Wraps any VarietyGenerator to cache generated varieties on disk. The cache
//! key is the hash of the normalized dish name, so "Tacos!" and "tacos" share
//! an entry.

use super::{GeneratorError, VarietyGenerator};
use crate::catalogue::VarietyRecord;
use crate::normalize::normalize;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// Cached generation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub generator: String,
    pub dish_name: String,
    pub query_hash: String,
    pub cached_at: DateTime<Utc>,
}

/// Generated varieties with metadata, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedVarieties {
    metadata: CacheMetadata,
    varieties: Vec<VarietyRecord>,
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub cached_dishes: usize,
}

/// A caching wrapper around any variety generator.
///
/// Only successful, non-empty generations are cached. Cache failures are
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct CachingGenerator {
    inner: Box<dyn VarietyGenerator>,
    cache_dir: PathBuf,
}

impl CachingGenerator {
    pub fn new(inner: Box<dyn VarietyGenerator>, cache_dir: PathBuf) -> Self {
        Self { inner, cache_dir }
    }

    /// Cache key for a normalized dish name.
    ///
    /// Uses SHA-256 for stable hashing across Rust versions.
    fn cache_key(&self, normalized: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        let result = hasher.finalize();

        // First 16 bytes (32 hex chars) for shorter filenames
        hex::encode(&result[..16])
    }

    fn generator_cache_dir(&self) -> PathBuf {
        self.cache_dir.join(self.inner.generator_name())
    }

    fn cache_path(&self, query_hash: &str) -> PathBuf {
        self.generator_cache_dir()
            .join(format!("{}.json", query_hash))
    }

    fn get_cached(&self, query_hash: &str) -> Option<Vec<VarietyRecord>> {
        let path = self.cache_path(query_hash);
        let content = fs::read_to_string(&path).ok()?;
        let cached: CachedVarieties = serde_json::from_str(&content).ok()?;

        tracing::debug!(
            generator = self.inner.generator_name(),
            query_hash = query_hash,
            "Variety cache hit"
        );
        Some(cached.varieties)
    }

    fn save_to_cache(
        &self,
        dish_name: &str,
        query_hash: &str,
        varieties: &[VarietyRecord],
    ) -> Result<(), GeneratorError> {
        let dir = self.generator_cache_dir();
        fs::create_dir_all(&dir).map_err(|e| GeneratorError::CacheError(e.to_string()))?;

        let cached = CachedVarieties {
            metadata: CacheMetadata {
                generator: self.inner.generator_name().to_string(),
                dish_name: dish_name.to_string(),
                query_hash: query_hash.to_string(),
                cached_at: Utc::now(),
            },
            varieties: varieties.to_vec(),
        };

        let content = serde_json::to_string_pretty(&cached)
            .map_err(|e| GeneratorError::CacheError(e.to_string()))?;
        fs::write(self.cache_path(query_hash), content)
            .map_err(|e| GeneratorError::CacheError(e.to_string()))?;

        tracing::debug!(
            generator = self.inner.generator_name(),
            query_hash = query_hash,
            "Generated varieties cached"
        );

        Ok(())
    }

    pub fn cache_stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();

        let Ok(entries) = fs::read_dir(self.generator_cache_dir()) else {
            return stats;
        };

        for entry in entries.filter_map(|e| e.ok()) {
            if entry
                .path()
                .extension()
                .map(|e| e == "json")
                .unwrap_or(false)
            {
                stats.cached_dishes += 1;
            }
        }

        stats
    }
}

#[async_trait]
impl VarietyGenerator for CachingGenerator {
    async fn generate(&self, dish_name: &str) -> Result<Vec<VarietyRecord>, GeneratorError> {
        let normalized = normalize(dish_name);
        let query_hash = self.cache_key(&normalized);

        if let Some(cached) = self.get_cached(&query_hash) {
            return Ok(cached);
        }

        tracing::debug!(
            generator = self.inner.generator_name(),
            query_hash = %query_hash,
            "Variety cache miss, calling generator"
        );

        let varieties = self.inner.generate(dish_name).await?;

        if !varieties.is_empty() {
            if let Err(e) = self.save_to_cache(&normalized, &query_hash, &varieties) {
                tracing::warn!(error = %e, "Failed to cache generated varieties");
            }
        }

        Ok(varieties)
    }

    fn generator_name(&self) -> &'static str {
        self.inner.generator_name()
    }
}
