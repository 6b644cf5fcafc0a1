use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    /// Plan order.
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
    ];

    /// Fraction of the daily target assigned to this slot. The four shares
    /// sum to exactly 1.0.
    pub fn share(self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.25,
            MealSlot::Lunch => 0.35,
            MealSlot::Snack => 0.10,
            MealSlot::Dinner => 0.30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snack => "snack",
            MealSlot::Dinner => "dinner",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

/// One recommended meal, per-serving values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub slot: MealSlot,
    pub name: String,
    pub ingredients: Vec<String>,
    pub calories: i32,
    pub macros: Macros,
    pub source: String,
    pub url: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

impl PlanSummary {
    pub fn of(meals: &[Meal]) -> Self {
        meals.iter().fold(Self::default(), |acc, m| Self {
            calories: acc.calories.saturating_add(m.calories),
            protein: acc.protein.saturating_add(m.macros.protein),
            carbs: acc.carbs.saturating_add(m.macros.carbs),
            fats: acc.fats.saturating_add(m.macros.fats),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Manual,
    Automatic,
}

impl GenerationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Manual => "manual",
            GenerationKind::Automatic => "automatic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(GenerationKind::Manual),
            "automatic" => Some(GenerationKind::Automatic),
            _ => None,
        }
    }
}

/// The unit of persistence: one per (user, calendar date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub user_id: Uuid,
    pub date: Date,
    pub target_daily_calories: i32,
    pub meals: Vec<Meal>,
    pub summary: PlanSummary,
    pub consumed_calories: i32,
    /// Which kind of generation last wrote the plan. `None` for plans
    /// written outside the generation flow; those still count as needing
    /// an automatic generation.
    pub origin: Option<GenerationKind>,
    pub manual_generation_count: i32,
    pub daily_generation_count: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_generated_at: Option<OffsetDateTime>,
}

impl DailyPlan {
    /// Freshly assembled plan without any generation bookkeeping.
    pub fn fresh(user_id: Uuid, date: Date, target_daily_calories: i32, meals: Vec<Meal>) -> Self {
        let mut plan = Self {
            user_id,
            date,
            target_daily_calories,
            meals,
            summary: PlanSummary::default(),
            consumed_calories: 0,
            origin: None,
            manual_generation_count: 0,
            daily_generation_count: 0,
            last_generated_at: None,
        };
        plan.recompute();
        plan
    }

    pub fn is_auto_generated(&self) -> bool {
        self.origin == Some(GenerationKind::Automatic)
    }

    /// Re-derives summary and consumed calories from the meals.
    pub fn recompute(&mut self) {
        self.summary = PlanSummary::of(&self.meals);
        self.consumed_calories = self
            .meals
            .iter()
            .filter(|m| m.completed)
            .fold(0i32, |acc, m| acc.saturating_add(m.calories));
    }

    pub fn remaining_calories(&self) -> i32 {
        self.target_daily_calories.saturating_sub(self.consumed_calories)
    }

    pub fn meal(&self, slot: MealSlot) -> Option<&Meal> {
        self.meals.iter().find(|m| m.slot == slot)
    }

    /// Marks the slot's meal as eaten. Returns false when the slot has no
    /// meal or it was already completed.
    pub fn complete_meal(&mut self, slot: MealSlot, at: OffsetDateTime) -> bool {
        let Some(meal) = self.meals.iter_mut().find(|m| m.slot == slot) else {
            return false;
        };
        if meal.completed {
            return false;
        }
        meal.completed = true;
        meal.completed_at = Some(at);
        self.recompute();
        true
    }
}

#[cfg(test)]
mod plan_tests {
    use super::*;
    use time::macros::{date, datetime};

    fn meal(slot: MealSlot, calories: i32) -> Meal {
        Meal {
            slot,
            name: format!("{} dish", slot.as_str()),
            ingredients: vec![],
            calories,
            macros: Macros {
                protein: 10,
                carbs: 20,
                fats: 5,
            },
            source: "test".into(),
            url: None,
            image: None,
            completed: false,
            completed_at: None,
        }
    }

    #[test]
    fn shares_sum_to_one() {
        let total: f64 = MealSlot::ALL.iter().map(|s| s.share()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fresh_plan_sums_meals() {
        let plan = DailyPlan::fresh(
            Uuid::new_v4(),
            date!(2026 - 10 - 17),
            2000,
            vec![meal(MealSlot::Breakfast, 500), meal(MealSlot::Dinner, 650)],
        );
        assert_eq!(plan.summary.calories, 1150);
        assert_eq!(plan.summary.protein, 20);
        assert_eq!(plan.summary.carbs, 40);
        assert_eq!(plan.summary.fats, 10);
        assert_eq!(plan.consumed_calories, 0);
        assert!(!plan.is_auto_generated());
    }

    #[test]
    fn completing_a_meal_updates_consumed_once() {
        let mut plan = DailyPlan::fresh(
            Uuid::new_v4(),
            date!(2026 - 10 - 17),
            2000,
            vec![meal(MealSlot::Breakfast, 500), meal(MealSlot::Lunch, 700)],
        );
        let at = datetime!(2026-10-17 08:30 UTC);

        assert!(plan.complete_meal(MealSlot::Breakfast, at));
        assert_eq!(plan.consumed_calories, 500);
        assert_eq!(plan.remaining_calories(), 1500);
        assert_eq!(plan.meal(MealSlot::Breakfast).unwrap().completed_at, Some(at));

        assert!(!plan.complete_meal(MealSlot::Breakfast, at));
        assert!(!plan.complete_meal(MealSlot::Snack, at));
        assert_eq!(plan.consumed_calories, 500);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut plan = DailyPlan::fresh(
            Uuid::new_v4(),
            date!(2026 - 10 - 17),
            2000,
            vec![meal(MealSlot::Lunch, i32::MAX), meal(MealSlot::Dinner, i32::MAX)],
        );
        assert_eq!(plan.summary.calories, i32::MAX);

        let at = datetime!(2026-10-17 13:00 UTC);
        assert!(plan.complete_meal(MealSlot::Lunch, at));
        assert!(plan.complete_meal(MealSlot::Dinner, at));
        assert_eq!(plan.consumed_calories, i32::MAX);
        assert_eq!(plan.remaining_calories(), 2000 - i32::MAX);
    }

    #[test]
    fn meals_serialize_with_slot_tags() {
        let json = serde_json::to_value(meal(MealSlot::Snack, 200)).unwrap();
        assert_eq!(json["slot"], "snack");
        assert_eq!(json["completed_at"], serde_json::Value::Null);
        let back: Meal = serde_json::from_value(json).unwrap();
        assert_eq!(back.calories, 200);
    }
}
