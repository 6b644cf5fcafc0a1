use crate::plans::dto::{Macros, Meal, MealSlot};
use crate::recipes::dto::{RecipeCandidate, CARBS, FAT, PROTEIN};

/// Label used when the index does not name a source.
pub const DEFAULT_SOURCE: &str = "MealPlanner";

/// Upper bounds for one serving. Upstream values past these are treated
/// as data errors and capped so plan totals stay well inside `i32`.
pub const MAX_MEAL_CALORIES: i32 = 10_000;
pub const MAX_MACRO_GRAMS: i32 = 1_000;

fn bounded(value: f64, max: i32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(max)) as i32
}

fn per_serving(candidate: &RecipeCandidate, code: &str) -> i32 {
    let total = candidate.nutrients.get(code).copied().unwrap_or(0.0);
    bounded(total / candidate.servings(), MAX_MACRO_GRAMS)
}

pub fn macros_per_serving(candidate: &RecipeCandidate) -> Macros {
    Macros {
        protein: per_serving(candidate, PROTEIN),
        carbs: per_serving(candidate, CARBS),
        fats: per_serving(candidate, FAT),
    }
}

pub fn calories_per_serving(candidate: &RecipeCandidate) -> i32 {
    bounded(candidate.calories_per_serving(), MAX_MEAL_CALORIES)
}

pub fn meal_from_candidate(slot: MealSlot, candidate: RecipeCandidate) -> Meal {
    Meal {
        slot,
        calories: calories_per_serving(&candidate),
        macros: macros_per_serving(&candidate),
        name: candidate.name,
        ingredients: candidate.ingredients,
        source: candidate
            .source
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        url: candidate.url,
        image: candidate.image,
        completed: false,
        completed_at: None,
    }
}
