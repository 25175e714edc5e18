//! The variety search flow: catalogue first, then the generator, then
//! generic suggestions.
//!
//! Local stages are filtered by diet preference. A local match that filters
//! down to nothing counts as no match, and the next stage runs.

use serde::Serialize;

use crate::catalogue::{Catalogue, VarietyRecord};
use crate::diet::{filter_by_diet, DietPreference};
use crate::error::SearchError;
use crate::generator::VarietyGenerator;
use crate::matcher::Matcher;

/// Where a search result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum VarietySource {
    StrictMatch { key: String },
    LooseMatch { key: String },
    Generated,
    GenericFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub source: VarietySource,
    pub varieties: Vec<VarietyRecord>,
}

/// Runs the search flow against a catalogue and a generator.
#[derive(Debug, Clone, Copy)]
pub struct VarietySearch<'a> {
    matcher: Matcher<'a>,
    generator: &'a dyn VarietyGenerator,
}

impl<'a> VarietySearch<'a> {
    pub fn new(catalogue: &'a Catalogue, generator: &'a dyn VarietyGenerator) -> Self {
        Self {
            matcher: Matcher::new(catalogue),
            generator,
        }
    }

    /// Find varieties for a dish name. Only an empty query is an error.
    pub async fn find(
        &self,
        query: &str,
        diet: DietPreference,
    ) -> Result<SearchOutcome, SearchError> {
        let dish_name = query.trim();
        if dish_name.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        if let Some(m) = self.matcher.strict_lookup(dish_name) {
            let varieties = filter_by_diet(&m.entry.varieties, diet);
            if !varieties.is_empty() {
                return Ok(SearchOutcome {
                    source: VarietySource::StrictMatch {
                        key: m.entry.key.clone(),
                    },
                    varieties,
                });
            }
            tracing::debug!(key = %m.entry.key, diet = %diet, "Strict match empty after diet filter");
        }

        if let Some(m) = self.matcher.loose_lookup(dish_name) {
            let varieties = filter_by_diet(&m.entry.varieties, diet);
            if !varieties.is_empty() {
                return Ok(SearchOutcome {
                    source: VarietySource::LooseMatch {
                        key: m.entry.key.clone(),
                    },
                    varieties,
                });
            }
            tracing::debug!(key = %m.entry.key, diet = %diet, "Loose match empty after diet filter");
        }

        match self.generator.generate(dish_name).await {
            Ok(varieties) if !varieties.is_empty() => {
                tracing::info!(
                    dish = %dish_name,
                    generator = self.generator.generator_name(),
                    count = varieties.len(),
                    "Generated varieties"
                );
                return Ok(SearchOutcome {
                    source: VarietySource::Generated,
                    varieties,
                });
            }
            Ok(_) => {
                tracing::warn!(
                    dish = %dish_name,
                    generator = self.generator.generator_name(),
                    "Generator returned no varieties"
                );
            }
            Err(e) => {
                tracing::warn!(
                    dish = %dish_name,
                    generator = self.generator.generator_name(),
                    error = %e,
                    "Variety generation failed"
                );
            }
        }

        Ok(SearchOutcome {
            source: VarietySource::GenericFallback,
            varieties: generic_suggestions(dish_name),
        })
    }
}

const GENERIC_STYLES: &[(&str, &str)] = &[
    ("Classic", "The traditional way, with familiar flavours"),
    ("Homestyle", "Simple everyday version made with pantry staples"),
    ("Spicy", "Extra chillies and a bold masala"),
    ("Restaurant-Style", "Rich and indulgent, like your favourite restaurant"),
];

/// Templated varieties for a dish nothing else knows about.
///
/// Never empty, even for a blank name.
pub fn generic_suggestions(dish_name: &str) -> Vec<VarietyRecord> {
    let mut dish = title_case(dish_name);
    if dish.is_empty() {
        dish = "Dish".to_string();
    }

    GENERIC_STYLES
        .iter()
        .map(|(style, description)| {
            VarietyRecord::untagged(format!("{} {}", style, dish), *description)
        })
        .collect()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{CatalogueEntry, DietTag};
    use crate::generator::{FakeGenerator, OfflineGenerator};

    fn names(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.varieties.iter().map(|v| v.name.as_str()).collect()
    }

    fn small_catalogue() -> Catalogue {
        Catalogue::new(vec![
            CatalogueEntry {
                key: "prawns".to_string(),
                varieties: vec![
                    VarietyRecord::untagged("Prawn Masala", "Onion tomato gravy")
                        .with_diet(DietTag::NonVeg),
                ],
            },
            CatalogueEntry {
                key: "curry".to_string(),
                varieties: vec![
                    VarietyRecord::untagged("Paneer Butter Masala", "Creamy")
                        .with_diet(DietTag::Veg),
                    VarietyRecord::untagged("Chicken Curry", "Homestyle")
                        .with_diet(DietTag::NonVeg),
                ],
            },
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let catalogue = small_catalogue();
        let search = VarietySearch::new(&catalogue, &OfflineGenerator);
        let result = search.find("   ", DietPreference::None).await;
        assert!(matches!(result, Err(SearchError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_strict_stage_first() {
        let catalogue = small_catalogue();
        let search = VarietySearch::new(&catalogue, &OfflineGenerator);

        let outcome = search.find("Spicy Curry", DietPreference::Veg).await.unwrap();
        assert_eq!(
            outcome.source,
            VarietySource::StrictMatch {
                key: "curry".to_string()
            }
        );
        assert_eq!(names(&outcome), vec!["Paneer Butter Masala"]);
    }

    #[tokio::test]
    async fn test_loose_stage_when_strict_misses() {
        let catalogue = small_catalogue();
        let search = VarietySearch::new(&catalogue, &OfflineGenerator);

        // No word-boundary hit, but "curryleaf" contains "curry".
        let outcome = search.find("curryleaf", DietPreference::None).await.unwrap();
        assert_eq!(
            outcome.source,
            VarietySource::LooseMatch {
                key: "curry".to_string()
            }
        );
        assert_eq!(outcome.varieties.len(), 2);
    }

    #[tokio::test]
    async fn test_diet_filter_falls_through_to_generator() {
        let catalogue = small_catalogue();
        let generator = FakeGenerator::with_response(
            "prawn",
            r#"{"varieties": [{"variety_name": "Raw Banana Prawn-Style Fry", "short_description": "Veg take"}]}"#,
        );
        let search = VarietySearch::new(&catalogue, &generator);

        let outcome = search.find("prawns", DietPreference::Veg).await.unwrap();
        assert_eq!(outcome.source, VarietySource::Generated);
        assert_eq!(names(&outcome), vec!["Raw Banana Prawn-Style Fry"]);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_generator_not_called_on_local_hit() {
        let catalogue = small_catalogue();
        let generator = FakeGenerator::new();
        let search = VarietySearch::new(&catalogue, &generator);

        search.find("prawns", DietPreference::NonVeg).await.unwrap();
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_gives_generic_suggestions() {
        let catalogue = small_catalogue();
        let search = VarietySearch::new(&catalogue, &OfflineGenerator);

        let outcome = search.find("  tacos  ", DietPreference::Veg).await.unwrap();
        assert_eq!(outcome.source, VarietySource::GenericFallback);
        assert_eq!(outcome.varieties.len(), GENERIC_STYLES.len());
        assert_eq!(outcome.varieties[0].name, "Classic Tacos");
        assert!(outcome.varieties.iter().all(|v| v.diet.is_none()));
    }

    #[tokio::test]
    async fn test_empty_generation_gives_generic_suggestions() {
        let catalogue = small_catalogue();
        let generator = FakeGenerator::with_response("tacos", r#"{"varieties": []}"#);
        let search = VarietySearch::new(&catalogue, &generator);

        let outcome = search.find("tacos", DietPreference::None).await.unwrap();
        assert_eq!(outcome.source, VarietySource::GenericFallback);
    }

    #[tokio::test]
    async fn test_builtin_catalogue_search() {
        let search = VarietySearch::new(Catalogue::builtin(), &OfflineGenerator);
        let outcome = search
            .find("fresh prawn biryani", DietPreference::None)
            .await
            .unwrap();
        assert_eq!(
            outcome.source,
            VarietySource::StrictMatch {
                key: "prawn biryani".to_string()
            }
        );
    }

    #[test]
    fn test_generic_suggestions() {
        let names: Vec<String> = generic_suggestions("paneer TIKKA")
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names[0], "Classic Paneer Tikka");
        assert_eq!(names[3], "Restaurant-Style Paneer Tikka");

        assert_eq!(generic_suggestions("").len(), GENERIC_STYLES.len());
        assert_eq!(generic_suggestions("")[0].name, "Classic Dish");
    }

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_value(VarietySource::LooseMatch {
            key: "pizza".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"stage": "loose_match", "key": "pizza"}));
    }
}
