//! Pantry search over the built-in recipe book.
//!
//! Users type the ingredients they have ("eggs, avocado, bread") and get back
//! recipes ranked by how well they match. A hit on the recipe name outranks
//! any number of ingredient hits.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::catalogue::DietTag;

/// Score bonus for a term that appears in the recipe name.
pub const NAME_MATCH_BONUS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time_minutes: u32,
    pub difficulty: Difficulty,
    pub category: MealCategory,
    pub diet: DietTag,
    pub image: String,
    pub servings: u32,
}

#[derive(Deserialize)]
struct RecipesFile {
    recipes: Vec<Recipe>,
}

static BUILTIN_RECIPES: LazyLock<Vec<Recipe>> = LazyLock::new(|| {
    let json = include_str!("../../data/recipes.json");
    let data: RecipesFile = serde_json::from_str(json).expect("Failed to parse recipes.json");
    data.recipes
});

/// The recipes bundled with the crate.
pub fn builtin_recipes() -> &'static [Recipe] {
    &BUILTIN_RECIPES
}

/// A recipe ranked against a pantry query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PantryMatch<'a> {
    pub recipe: &'a Recipe,
    pub score: usize,
    /// (term, ingredient) pairs where the ingredient contains the term.
    pub matched: usize,
    /// Ingredients left over after the matches; never negative.
    pub missing: usize,
}

/// Split a pantry query into lowercase terms.
pub fn pantry_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(',')
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Rank recipes against a comma-separated list of pantry ingredients.
///
/// Recipes with no name or ingredient hit are dropped. The order is by score,
/// highest first; equal scores keep the input order.
pub fn search_recipes<'a>(recipes: &'a [Recipe], query: &str) -> Vec<PantryMatch<'a>> {
    let terms = pantry_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<PantryMatch<'a>> = recipes
        .iter()
        .map(|recipe| score_recipe(recipe, &terms))
        .filter(|m| m.score > 0)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(
        terms = terms.len(),
        results = ranked.len(),
        "Pantry search"
    );

    ranked
}

fn score_recipe<'a>(recipe: &'a Recipe, terms: &[String]) -> PantryMatch<'a> {
    let name = recipe.name.to_lowercase();
    let ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|i| i.name.to_lowercase())
        .collect();

    let mut name_match = false;
    let mut matched = 0;

    for term in terms {
        if name.contains(term.as_str()) {
            name_match = true;
        }
        matched += ingredients
            .iter()
            .filter(|ingredient| ingredient.contains(term.as_str()))
            .count();
    }

    let score = if name_match {
        NAME_MATCH_BONUS + matched
    } else {
        matched
    };

    PantryMatch {
        recipe,
        score,
        matched,
        missing: recipe.ingredients.len().saturating_sub(matched),
    }
}
