pub mod catalogue;
pub mod config;
pub mod diet;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod normalize;
pub mod pantry;
pub mod search;

pub use catalogue::{Catalogue, CatalogueEntry, DietTag, VarietyRecord};
pub use config::{ConfigError, GeneratorKind, TadkaConfig};
pub use diet::{filter_by_diet, DietPreference, UnknownDietPreference};
pub use error::{CatalogueError, SearchError};
pub use generator::{
    create_generator_from_env, parse_generated_varieties, CacheStats, CachingGenerator,
    FakeGenerator, GeneratorError, OfflineGenerator, VarietyGenerator,
};
pub use matcher::{LooseMatch, LooseMatchKind, Matcher, StrictMatch, StrictMatchKind};
pub use normalize::normalize;
pub use pantry::{builtin_recipes, search_recipes, PantryMatch, Recipe};
pub use search::{generic_suggestions, SearchOutcome, VarietySearch, VarietySource};

/// Loose match against the built-in catalogue.
pub fn get_loose_match(dish_name: &str) -> Option<&'static [VarietyRecord]> {
    Matcher::new(Catalogue::builtin()).loose_match(dish_name)
}

/// Strict match against the built-in catalogue.
pub fn get_strict_match(query: &str) -> Option<&'static [VarietyRecord]> {
    Matcher::new(Catalogue::builtin()).strict_match(query)
}
