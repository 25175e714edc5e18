//! Fake variety generator for testing.
//!
//! Returns canned model responses based on dish-name matching, so the search
//! flow can be exercised without network access.

use super::{parse_generated_varieties, GeneratorError, VarietyGenerator};
use crate::catalogue::VarietyRecord;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// A fake variety generator.
///
/// Responses are raw model output (JSON, optionally fenced) keyed by a
/// substring of the dish name, and go through the same parser a real
/// generator would use. Patterns are tried in registration order.
#[derive(Debug, Default)]
pub struct FakeGenerator {
    responses: RwLock<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator with a single canned response.
    pub fn with_response(dish_contains: &str, content: &str) -> Self {
        let generator = Self::new();
        generator.add_response(dish_contains, content);
        generator
    }

    /// Register a response for dish names containing `dish_contains`.
    pub fn add_response(&self, dish_contains: &str, content: &str) {
        self.responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((dish_contains.to_lowercase(), content.to_string()));
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Canned responses for a few dishes the built-in catalogue lacks.
    pub fn with_demo_responses() -> Self {
        let generator = Self::new();

        generator.add_response(
            "taco",
            r#"{
                "dish_name": "tacos",
                "varieties": [
                    {"variety_name": "Tacos al Pastor", "short_description": "Spit-roasted pork with pineapple"},
                    {"variety_name": "Fish Tacos", "short_description": "Baja style battered fish with slaw"},
                    {"variety_name": "Carnitas Tacos", "short_description": "Slow-braised crispy pork"},
                    {"variety_name": "Paneer Tikka Tacos", "short_description": "Indian fusion with grilled paneer"}
                ]
            }"#,
        );

        generator.add_response(
            "dosa",
            "```json\n{\"dish_name\": \"dosa\", \"varieties\": [\
             {\"variety_name\": \"Masala Dosa\", \"short_description\": \"Crispy crepe with potato filling\"},\
             {\"variety_name\": \"Rava Dosa\", \"short_description\": \"Lacy semolina crepe\"},\
             {\"variety_name\": \"Mysore Masala Dosa\", \"short_description\": \"Spread with spicy red chutney\"}\
             ]}\n```",
        );

        generator
    }
}

#[async_trait]
impl VarietyGenerator for FakeGenerator {
    async fn generate(&self, dish_name: &str) -> Result<Vec<VarietyRecord>, GeneratorError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let dish = dish_name.to_lowercase();
        let content = self
            .responses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|(pattern, _)| dish.contains(pattern.as_str()))
            .map(|(_, content)| content.clone());

        match content {
            Some(content) => parse_generated_varieties(&content),
            None => Err(GeneratorError::RequestFailed(format!(
                "FakeGenerator: no response configured for {:?}",
                dish_name
            ))),
        }
    }

    fn generator_name(&self) -> &'static str {
        "fake"
    }
}
