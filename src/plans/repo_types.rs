use sqlx::{types::Json, FromRow};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::{DailyPlan, GenerationKind, Meal, PlanSummary};
use crate::error::StoreError;

/// Column list shared by every statement that returns a plan row.
pub(crate) const PLAN_COLUMNS: &str = "user_id, plan_date, target_daily_calories, meals, \
     total_calories, total_protein, total_carbs, total_fats, consumed_calories, \
     generation_origin, manual_generation_count, daily_generation_count, last_generated_at";

#[derive(Debug, FromRow)]
pub struct PlanRow {
    pub user_id: Uuid,
    pub plan_date: Date,
    pub target_daily_calories: i32,
    pub meals: Json<Vec<Meal>>,
    pub total_calories: i32,
    pub total_protein: i32,
    pub total_carbs: i32,
    pub total_fats: i32,
    pub consumed_calories: i32,
    pub generation_origin: Option<String>,
    pub manual_generation_count: i32,
    pub daily_generation_count: i32,
    pub last_generated_at: Option<OffsetDateTime>,
}

impl TryFrom<PlanRow> for DailyPlan {
    type Error = StoreError;

    fn try_from(r: PlanRow) -> Result<Self, Self::Error> {
        let origin = match r.generation_origin.as_deref() {
            None => None,
            Some(s) => Some(GenerationKind::parse(s).ok_or_else(|| {
                StoreError::Corrupt(format!("unknown generation_origin {s:?}"))
            })?),
        };
        Ok(Self {
            user_id: r.user_id,
            date: r.plan_date,
            target_daily_calories: r.target_daily_calories,
            meals: r.meals.0,
            summary: PlanSummary {
                calories: r.total_calories,
                protein: r.total_protein,
                carbs: r.total_carbs,
                fats: r.total_fats,
            },
            consumed_calories: r.consumed_calories,
            origin,
            manual_generation_count: r.manual_generation_count,
            daily_generation_count: r.daily_generation_count,
            last_generated_at: r.last_generated_at,
        })
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;
    use time::macros::date;

    fn row(origin: Option<&str>) -> PlanRow {
        PlanRow {
            user_id: Uuid::nil(),
            plan_date: date!(2026 - 10 - 17),
            target_daily_calories: 2308,
            meals: Json(vec![]),
            total_calories: 0,
            total_protein: 0,
            total_carbs: 0,
            total_fats: 0,
            consumed_calories: 0,
            generation_origin: origin.map(str::to_string),
            manual_generation_count: 2,
            daily_generation_count: 2,
            last_generated_at: None,
        }
    }

    #[test]
    fn maps_origin_column() {
        let plan = DailyPlan::try_from(row(Some("automatic"))).unwrap();
        assert!(plan.is_auto_generated());
        let plan = DailyPlan::try_from(row(None)).unwrap();
        assert_eq!(plan.origin, None);
        assert!(matches!(
            DailyPlan::try_from(row(Some("cron"))),
            Err(StoreError::Corrupt(_))
        ));
    }
}
