use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Failed to read catalogue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalogue JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Catalogue key must not be empty")]
    EmptyKey,

    #[error("Catalogue key {0:?} must be lowercase with no surrounding whitespace")]
    NonCanonicalKey(String),

    #[error("Duplicate catalogue key: {0}")]
    DuplicateKey(String),

    #[error("Catalogue entry {0:?} has no varieties")]
    NoVarieties(String),

    #[error("Catalogue entry {0:?} has a variety with an empty name")]
    EmptyVarietyName(String),

    #[error("Catalogue key {key:?} cannot be compiled into a match pattern: {source}")]
    KeyPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("Inconsistent diet tagging: {untagged} of {total} varieties have no diet tag")]
    InconsistentDietTags { untagged: usize, total: usize },
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please provide a dish name")]
    EmptyQuery,
}
