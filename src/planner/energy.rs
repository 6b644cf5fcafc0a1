//! Daily energy target and its split across the four meal slots.

use crate::plans::dto::MealSlot;
use crate::profiles::dto::{HealthGoal, Sex, UserProfile};

/// Used when age, height or weight is unknown.
pub const DEFAULT_MAINTENANCE_CALORIES: i32 = 2000;
pub const MIN_MAINTENANCE_CALORIES: i32 = 1200;
/// Light activity.
const ACTIVITY_FACTOR: f64 = 1.4;

/// Mifflin-St Jeor sex adjustment. `Unspecified` sits halfway between the
/// male and female constants.
fn sex_adjustment(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
        Sex::Unspecified => -78.0,
    }
}

pub fn maintenance_calories(
    age: Option<u32>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    sex: Sex,
) -> i32 {
    let (Some(age), Some(height), Some(weight)) = (
        age.filter(|a| *a > 0),
        height_cm.filter(|h| *h > 0.0),
        weight_kg.filter(|w| *w > 0.0),
    ) else {
        return DEFAULT_MAINTENANCE_CALORIES;
    };

    let bmr = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + sex_adjustment(sex);
    ((bmr * ACTIVITY_FACTOR).round() as i32).max(MIN_MAINTENANCE_CALORIES)
}

pub fn goal_multiplier(goal: Option<HealthGoal>) -> f64 {
    match goal {
        Some(HealthGoal::WeightLoss) => 0.85,
        Some(HealthGoal::MuscleGain) => 1.15,
        Some(HealthGoal::Maintenance) | Some(HealthGoal::GeneralHealth) | None => 1.0,
    }
}

pub fn target_daily_calories(profile: &UserProfile) -> i32 {
    let maintenance = maintenance_calories(
        profile.age,
        profile.height_cm,
        profile.weight_kg,
        profile.sex,
    );
    (f64::from(maintenance) * goal_multiplier(profile.goal)).round() as i32
}

/// Per-slot calorie sub-targets, `round(target × share)` each. They need not
/// add back up to `target` exactly.
pub fn distribute(target: i32) -> [(MealSlot, i32); 4] {
    MealSlot::ALL.map(|slot| (slot, (f64::from(target) * slot.share()).round() as i32))
}
