use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::dto::{DailyPlan, GenerationKind, MealSlot};
use super::repo_types::{PlanRow, PLAN_COLUMNS};
use crate::error::StoreError;

#[derive(Debug)]
pub enum CompletionOutcome {
    Completed(DailyPlan),
    NoPlan,
    NotCompletable,
}

/// Storage for daily plans, keyed by (user, date).
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn find(&self, user_id: Uuid, date: Date) -> Result<Option<DailyPlan>, StoreError>;

    /// Writes a freshly generated plan and bumps the generation counters in
    /// one atomic step. Returns `None` without writing anything when the
    /// record no longer accepts this kind of generation: the manual quota is
    /// used up, or an automatic run would replace a stamped plan.
    async fn apply_generation(
        &self,
        fresh: &DailyPlan,
        kind: GenerationKind,
        at: OffsetDateTime,
        limit: i32,
    ) -> Result<Option<DailyPlan>, StoreError>;

    async fn complete_meal(
        &self,
        user_id: Uuid,
        date: Date,
        slot: MealSlot,
        at: OffsetDateTime,
    ) -> Result<CompletionOutcome, StoreError>;

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, StoreError>;
}

/// Conditional upsert behind `apply_generation`. The conflict branch's WHERE
/// mirrors `GenerationPolicy::apply`: manual writes need
/// `daily_generation_count < limit` and bump both counters; automatic writes
/// only replace a row with no `generation_origin` and keep the counters. A
/// row failing the guard is left untouched and RETURNING yields nothing.
/// Binds `$1..$11`, plus `$12` (the limit) for manual writes.
fn generation_upsert_sql(kind: GenerationKind) -> String {
    let (initial_counts, counter_update, guard) = match kind {
        GenerationKind::Manual => (
            "1, 1",
            "manual_generation_count = meal_plans.manual_generation_count + 1,
             daily_generation_count = meal_plans.daily_generation_count + 1,",
            "meal_plans.daily_generation_count < $12",
        ),
        GenerationKind::Automatic => ("0, 0", "", "meal_plans.generation_origin IS NULL"),
    };
    format!(
        r#"
        INSERT INTO meal_plans (user_id, plan_date, target_daily_calories, meals,
                                total_calories, total_protein, total_carbs, total_fats,
                                consumed_calories, generation_origin,
                                manual_generation_count, daily_generation_count,
                                last_generated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, {initial_counts}, $11)
        ON CONFLICT (user_id, plan_date) DO UPDATE SET
            target_daily_calories = EXCLUDED.target_daily_calories,
            meals = EXCLUDED.meals,
            total_calories = EXCLUDED.total_calories,
            total_protein = EXCLUDED.total_protein,
            total_carbs = EXCLUDED.total_carbs,
            total_fats = EXCLUDED.total_fats,
            consumed_calories = EXCLUDED.consumed_calories,
            generation_origin = EXCLUDED.generation_origin,
            {counter_update}
            last_generated_at = EXCLUDED.last_generated_at,
            updated_at = now()
        WHERE {guard}
        RETURNING {PLAN_COLUMNS}
        "#
    )
}

#[derive(Clone)]
pub struct PgPlanStore {
    db: PgPool,
}

impl PgPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn find(&self, user_id: Uuid, date: Date) -> Result<Option<DailyPlan>, StoreError> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM meal_plans WHERE user_id = $1 AND plan_date = $2"
        );
        let row = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.db)
            .await?;
        row.map(DailyPlan::try_from).transpose()
    }

    async fn apply_generation(
        &self,
        fresh: &DailyPlan,
        kind: GenerationKind,
        at: OffsetDateTime,
        limit: i32,
    ) -> Result<Option<DailyPlan>, StoreError> {
        let sql = generation_upsert_sql(kind);

        let mut query = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(fresh.user_id)
            .bind(fresh.date)
            .bind(fresh.target_daily_calories)
            .bind(Json(&fresh.meals))
            .bind(fresh.summary.calories)
            .bind(fresh.summary.protein)
            .bind(fresh.summary.carbs)
            .bind(fresh.summary.fats)
            .bind(fresh.consumed_calories)
            .bind(kind.as_str())
            .bind(at);
        if kind == GenerationKind::Manual {
            query = query.bind(limit);
        }

        let row = query.fetch_optional(&self.db).await?;
        debug!(user_id = %fresh.user_id, kind = kind.as_str(), written = row.is_some(), "apply_generation");
        row.map(DailyPlan::try_from).transpose()
    }

    async fn complete_meal(
        &self,
        user_id: Uuid,
        date: Date,
        slot: MealSlot,
        at: OffsetDateTime,
    ) -> Result<CompletionOutcome, StoreError> {
        let mut tx = self.db.begin().await?;

        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM meal_plans \
             WHERE user_id = $1 AND plan_date = $2 FOR UPDATE"
        );
        let row = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(CompletionOutcome::NoPlan);
        };

        let mut plan = DailyPlan::try_from(row)?;
        if !plan.complete_meal(slot, at) {
            return Ok(CompletionOutcome::NotCompletable);
        }

        sqlx::query(
            r#"
            UPDATE meal_plans
               SET meals = $3,
                   total_calories = $4,
                   consumed_calories = $5,
                   updated_at = now()
             WHERE user_id = $1 AND plan_date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(Json(&plan.meals))
        .bind(plan.summary.calories)
        .bind(plan.consumed_calories)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(CompletionOutcome::Completed(plan))
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let res = sqlx::query(r#"DELETE FROM meal_plans WHERE user_id = $1"#)
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected())
    }
}
