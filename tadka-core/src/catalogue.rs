//! Dish variety catalogue.
//!
//! Maps canonical dish-category keys ("biryani", "mutton biryani", ...) to the
//! varieties shown for that category. The built-in catalogue is loaded from
//! `data/dish_varieties.json` at compile time and parsed once; other
//! catalogues can be loaded from disk. A catalogue is never mutated after
//! loading.
//!
//! Every record in a catalogue carries a diet tag, or none does. `image_ref`
//! is exempt from that rule: only varieties with a bundled image set it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;
use crate::normalize::{normalize, phrase_pattern};

/// Dietary classification of a single variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietTag {
    Veg,
    NonVeg,
}

impl DietTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietTag::Veg => "veg",
            DietTag::NonVeg => "non-veg",
        }
    }
}

/// A specific named variant of a dish category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyRecord {
    pub name: String,
    pub short_description: String,
    /// Pre-bundled image asset. `None` means the image has to be fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietTag>,
}

impl VarietyRecord {
    /// A variety with no bundled image and no diet tag.
    pub fn untagged(name: impl Into<String>, short_description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: short_description.into(),
            image_ref: None,
            diet: None,
        }
    }

    pub fn with_diet(mut self, diet: DietTag) -> Self {
        self.diet = Some(diet);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub key: String,
    pub varieties: Vec<VarietyRecord>,
}

/// The raw JSON structure of a catalogue file.
#[derive(Deserialize)]
struct CatalogueFile {
    entries: Vec<CatalogueEntry>,
}

/// An immutable, validated set of catalogue entries.
///
/// Entries keep the order they were loaded in; matching relies on that order
/// to break ties deterministically.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
    index: HashMap<String, usize>,
    /// One per entry, in entry order.
    normalized_keys: Vec<NormalizedKey>,
}

/// A key in strict-matching form, with its whole-phrase pattern.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedKey {
    pub(crate) text: String,
    pub(crate) pattern: Regex,
}

static BUILTIN_JSON: &str = include_str!("../../data/dish_varieties.json");

static BUILTIN: LazyLock<Catalogue> = LazyLock::new(|| {
    let catalogue =
        Catalogue::from_json(BUILTIN_JSON).expect("dish_varieties.json should be a valid catalogue");
    tracing::debug!(entries = catalogue.len(), "Loaded built-in dish catalogue");
    catalogue
});

impl Catalogue {
    /// The catalogue bundled with the crate.
    pub fn builtin() -> &'static Catalogue {
        &BUILTIN
    }

    /// Build a catalogue from entries, validating them.
    pub fn new(entries: Vec<CatalogueEntry>) -> Result<Self, CatalogueError> {
        let mut index = HashMap::with_capacity(entries.len());
        let mut total = 0;
        let mut untagged = 0;

        for (i, entry) in entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(CatalogueError::EmptyKey);
            }
            if entry.key != entry.key.trim().to_lowercase() {
                return Err(CatalogueError::NonCanonicalKey(entry.key.clone()));
            }
            if index.insert(entry.key.clone(), i).is_some() {
                return Err(CatalogueError::DuplicateKey(entry.key.clone()));
            }
            if entry.varieties.is_empty() {
                return Err(CatalogueError::NoVarieties(entry.key.clone()));
            }

            for variety in &entry.varieties {
                if variety.name.trim().is_empty() {
                    return Err(CatalogueError::EmptyVarietyName(entry.key.clone()));
                }
                total += 1;
                if variety.diet.is_none() {
                    untagged += 1;
                }
            }
        }

        // Diet tagging is all-or-nothing across the catalogue.
        if untagged != 0 && untagged != total {
            return Err(CatalogueError::InconsistentDietTags { untagged, total });
        }

        let normalized_keys = entries
            .iter()
            .map(|entry| {
                let text = normalize(&entry.key);
                let pattern =
                    phrase_pattern(&text).map_err(|source| CatalogueError::KeyPattern {
                        key: entry.key.clone(),
                        source,
                    })?;
                Ok(NormalizedKey { text, pattern })
            })
            .collect::<Result<Vec<_>, CatalogueError>>()?;

        Ok(Self {
            entries,
            index,
            normalized_keys,
        })
    }

    /// Parse and validate a catalogue from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        Self::new(file.entries)
    }

    /// Load and validate a catalogue file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalogue = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            entries = catalogue.len(),
            "Loaded dish catalogue"
        );
        Ok(catalogue)
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&CatalogueEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    /// Keys in load order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether varieties in this catalogue carry diet tags.
    pub fn is_diet_tagged(&self) -> bool {
        self.entries
            .iter()
            .flat_map(|e| &e.varieties)
            .all(|v| v.diet.is_some())
            && !self.is_empty()
    }

    /// Entries paired with their normalized keys, in catalogue order.
    pub(crate) fn normalized_entries(
        &self,
    ) -> impl Iterator<Item = (&CatalogueEntry, &NormalizedKey)> {
        self.entries.iter().zip(&self.normalized_keys)
    }
}
