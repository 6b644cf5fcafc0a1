use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const PROTEIN: &str = "PROCNT";
pub const CARBS: &str = "CHOCDF";
pub const FAT: &str = "FAT";

/// One recipe as reported by the search index. Calories and nutrient
/// quantities cover the whole recipe, not one serving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    pub name: String,
    pub servings: Option<f64>,
    pub total_calories: Option<f64>,
    pub nutrients: HashMap<String, f64>,
    pub ingredients: Vec<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub cuisine_tags: Vec<String>,
}

impl RecipeCandidate {
    /// Serving count used for per-serving math; absent, zero or fractional
    /// values below one count as a single serving.
    pub fn servings(&self) -> f64 {
        self.servings.unwrap_or(1.0).max(1.0)
    }

    pub fn calories_per_serving(&self) -> f64 {
        self.total_calories.unwrap_or(0.0) / self.servings()
    }
}

/// Structured filters sent alongside the free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub cuisine: Option<&'static str>,
    pub vegetarian: bool,
    pub meal_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub filters: SearchFilters,
    /// Value of the `Edamam-Account-User` header.
    pub account_user: String,
}

// ---- Edamam v2 wire format ----

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hit {
    pub recipe: EdamamRecipe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EdamamRecipe {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    #[serde(rename = "yield")]
    pub servings: Option<f64>,
    pub calories: Option<f64>,
    #[serde(default)]
    pub total_nutrients: HashMap<String, Nutrient>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub cuisine_type: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Nutrient {
    pub quantity: Option<f64>,
}

impl From<EdamamRecipe> for RecipeCandidate {
    fn from(r: EdamamRecipe) -> Self {
        let nutrients = r
            .total_nutrients
            .into_iter()
            .filter_map(|(code, n)| n.quantity.map(|q| (code, q)))
            .collect();
        Self {
            name: r.label,
            servings: r.servings,
            total_calories: r.calories,
            nutrients,
            ingredients: r.ingredient_lines,
            source: r.source,
            url: r.url,
            image: r.image,
            cuisine_tags: r.cuisine_type,
        }
    }
}
