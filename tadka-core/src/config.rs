//! Configuration from environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::diet::DietPreference;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// Which variety generator the search flow falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    /// No generator; unknown dishes get generic suggestions.
    #[default]
    Offline,
    /// Canned demo responses.
    Fake,
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct TadkaConfig {
    /// Catalogue file to use instead of the embedded one.
    pub catalogue_path: Option<PathBuf>,
    /// Diet preference applied when a caller does not give one.
    pub default_diet: DietPreference,
    /// Directory for cached generator output.
    pub cache_dir: PathBuf,
    pub generator: GeneratorKind,
    pub cache_enabled: bool,
}

impl Default for TadkaConfig {
    fn default() -> Self {
        Self {
            catalogue_path: None,
            default_diet: DietPreference::None,
            cache_dir: Self::default_cache_dir(),
            generator: GeneratorKind::Offline,
            cache_enabled: true,
        }
    }
}

impl TadkaConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `TADKA_CATALOGUE_PATH`: catalogue JSON file (default: embedded catalogue)
    /// - `TADKA_DIET`: `veg`, `non-veg` or `none` (default: none)
    /// - `TADKA_CACHE_DIR`: generator cache directory (default: "~/.tadka/variety-cache")
    /// - `TADKA_GENERATOR`: `offline` or `fake` (default: offline)
    /// - `TADKA_NO_CACHE`: disable the generator cache (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalogue_path = lookup("TADKA_CATALOGUE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let default_diet = match lookup("TADKA_DIET") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "TADKA_DIET",
                value,
            })?,
            None => DietPreference::None,
        };

        let cache_dir = lookup("TADKA_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_cache_dir);

        let generator = match lookup("TADKA_GENERATOR") {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "" | "offline" => GeneratorKind::Offline,
                "fake" => GeneratorKind::Fake,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "TADKA_GENERATOR",
                        value,
                    })
                }
            },
            None => GeneratorKind::Offline,
        };

        let cache_enabled = !lookup("TADKA_NO_CACHE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            catalogue_path,
            default_diet,
            cache_dir,
            generator,
            cache_enabled,
        })
    }

    /// Default cache directory: ~/.tadka/variety-cache
    pub fn default_cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tadka")
            .join("variety-cache")
    }
}
