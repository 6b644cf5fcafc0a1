use std::time::Duration;

use tracing::{debug, warn};

use super::normalize::{meal_from_candidate, DEFAULT_SOURCE};
use super::query::SlotQuery;
use super::selector::select_best;
use super::sources::{choose, RandomSource};
use crate::plans::dto::{Macros, Meal, MealSlot};
use crate::recipes::dto::{RecipeCandidate, SearchQuery};
use crate::recipes::RecipeSearch;

pub const PLACEHOLDER_INGREDIENT: &str = "Nutritious ingredients";

struct CannedMeal {
    name: &'static str,
    calories: i32,
    protein: i32,
    carbs: i32,
    fats: i32,
}

const fn canned(name: &'static str, calories: i32, protein: i32, carbs: i32, fats: i32) -> CannedMeal {
    CannedMeal {
        name,
        calories,
        protein,
        carbs,
        fats,
    }
}

static BREAKFAST: [CannedMeal; 3] = [
    canned("Oatmeal with Fruits", 350, 12, 65, 8),
    canned("Scrambled Eggs with Toast", 400, 20, 35, 18),
    canned("Greek Yogurt with Granola", 320, 15, 45, 10),
];
static LUNCH: [CannedMeal; 3] = [
    canned("Grilled Chicken Salad", 450, 35, 25, 22),
    canned("Vegetable Rice Bowl", 420, 12, 75, 8),
    canned("Lentil Curry with Rice", 480, 18, 78, 12),
];
static SNACK: [CannedMeal; 3] = [
    canned("Mixed Nuts", 200, 6, 8, 18),
    canned("Apple with Peanut Butter", 180, 4, 25, 8),
    canned("Greek Yogurt", 150, 15, 12, 5),
];
static DINNER: [CannedMeal; 3] = [
    canned("Grilled Fish with Vegetables", 380, 30, 20, 18),
    canned("Chicken Stir Fry", 420, 28, 35, 16),
    canned("Vegetable Pasta", 400, 12, 70, 10),
];

fn canned_table(slot: MealSlot) -> &'static [CannedMeal] {
    match slot {
        MealSlot::Breakfast => &BREAKFAST,
        MealSlot::Lunch => &LUNCH,
        MealSlot::Snack => &SNACK,
        MealSlot::Dinner => &DINNER,
    }
}

/// Last tier: a preset meal that needs no network.
pub fn canned_meal(slot: MealSlot, random: &dyn RandomSource) -> Meal {
    let table = canned_table(slot);
    let m = choose(random, table).unwrap_or(&table[0]);
    Meal {
        slot,
        name: m.name.to_string(),
        ingredients: vec![PLACEHOLDER_INGREDIENT.to_string()],
        calories: m.calories,
        macros: Macros {
            protein: m.protein,
            carbs: m.carbs,
            fats: m.fats,
        },
        source: DEFAULT_SOURCE.to_string(),
        url: None,
        image: None,
        completed: false,
        completed_at: None,
    }
}

/// Runs one search with a hard deadline and picks the closest candidate.
/// Failures and timeouts count as "no match".
pub async fn search_and_select(
    search: &dyn RecipeSearch,
    timeout: Duration,
    query: &SearchQuery,
    sub_target: i32,
) -> Option<RecipeCandidate> {
    let candidates = match tokio::time::timeout(timeout, search.search(query)).await {
        Ok(Ok(candidates)) => candidates,
        Ok(Err(e)) => {
            warn!(error = %e, q = %query.text, "recipe search failed");
            return None;
        }
        Err(_) => {
            warn!(q = %query.text, timeout_ms = timeout.as_millis() as u64, "recipe search timed out");
            return None;
        }
    };
    select_best(&candidates, sub_target, query.filters.cuisine).cloned()
}

/// Recovery path for a slot whose primary search found nothing: the first
/// regional keyword alone, then the bare slot name, then a canned meal.
pub struct FallbackChain<'a> {
    pub search: &'a dyn RecipeSearch,
    pub random: &'a dyn RandomSource,
    pub timeout: Duration,
    pub account_user: &'a str,
}

impl FallbackChain<'_> {
    pub async fn recover(&self, slot_query: &SlotQuery, sub_target: i32) -> Meal {
        let slot = slot_query.slot;
        let texts = slot_query
            .first_keyword
            .into_iter()
            .chain(std::iter::once(slot.as_str()));

        for (tier, text) in texts.enumerate() {
            let query = SearchQuery {
                text: text.to_string(),
                filters: slot_query.filters.clone(),
                account_user: self.account_user.to_string(),
            };
            if let Some(candidate) =
                search_and_select(self.search, self.timeout, &query, sub_target).await
            {
                debug!(slot = slot.as_str(), tier = tier + 1, q = %query.text, "fallback tier matched");
                return meal_from_candidate(slot, candidate);
            }
        }

        let meal = canned_meal(slot, self.random);
        warn!(slot = slot.as_str(), meal = %meal.name, "no recipes found, using canned meal");
        meal
    }
}
