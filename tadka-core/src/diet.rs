//! Dietary preference filtering.
//!
//! Filtering is strict: under a `veg` or `non-veg` preference, a variety
//! without a diet tag is dropped rather than assumed safe. Callers should
//! treat an empty result as "no local match".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalogue::{DietTag, VarietyRecord};

/// A user-level diet restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietPreference {
    Veg,
    NonVeg,
    #[default]
    None,
}

impl DietPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietPreference::Veg => "veg",
            DietPreference::NonVeg => "non-veg",
            DietPreference::None => "none",
        }
    }

    /// The tag a variety needs to satisfy this preference, if any.
    pub fn required_tag(&self) -> Option<DietTag> {
        match self {
            DietPreference::Veg => Some(DietTag::Veg),
            DietPreference::NonVeg => Some(DietTag::NonVeg),
            DietPreference::None => None,
        }
    }

    /// Whether a single variety is visible under this preference.
    pub fn allows(&self, record: &VarietyRecord) -> bool {
        match self.required_tag() {
            Some(tag) => record.diet == Some(tag),
            None => true,
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown diet preference {0:?} (expected veg, non-veg or none)")]
pub struct UnknownDietPreference(pub String);

impl FromStr for DietPreference {
    type Err = UnknownDietPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veg" | "vegetarian" => Ok(DietPreference::Veg),
            "non-veg" | "nonveg" | "non_veg" => Ok(DietPreference::NonVeg),
            "none" | "" => Ok(DietPreference::None),
            _ => Err(UnknownDietPreference(s.to_string())),
        }
    }
}

/// Filter varieties by diet preference.
///
/// Returns a new list in the original order; the input is left untouched.
pub fn filter_by_diet(records: &[VarietyRecord], preference: DietPreference) -> Vec<VarietyRecord> {
    records
        .iter()
        .filter(|record| preference.allows(record))
        .cloned()
        .collect()
}
