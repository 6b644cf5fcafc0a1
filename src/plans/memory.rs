use std::collections::HashMap;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::dto::{DailyPlan, GenerationKind, MealSlot};
use super::repo::{CompletionOutcome, PlanStore};
use crate::error::StoreError;
use crate::planner::policy::GenerationPolicy;

/// Plan store held in process memory. Every operation runs under one lock,
/// which gives the same all-or-nothing behaviour as the Postgres store.
#[derive(Default)]
pub struct InMemoryPlanStore {
    plans: Mutex<HashMap<(Uuid, Date), DailyPlan>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a plan as-is, bypassing the generation rules.
    pub async fn put(&self, plan: DailyPlan) {
        self.plans
            .lock()
            .await
            .insert((plan.user_id, plan.date), plan);
    }

    pub async fn len(&self) -> usize {
        self.plans.lock().await.len()
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn find(&self, user_id: Uuid, date: Date) -> Result<Option<DailyPlan>, StoreError> {
        Ok(self.plans.lock().await.get(&(user_id, date)).cloned())
    }

    async fn apply_generation(
        &self,
        fresh: &DailyPlan,
        kind: GenerationKind,
        at: OffsetDateTime,
        limit: i32,
    ) -> Result<Option<DailyPlan>, StoreError> {
        let mut plans = self.plans.lock().await;
        let key = (fresh.user_id, fresh.date);
        let policy = GenerationPolicy::new(u32::try_from(limit).unwrap_or(0));
        let Some(next) = policy.apply(plans.get(&key), fresh.clone(), kind, at) else {
            return Ok(None);
        };
        plans.insert(key, next.clone());
        Ok(Some(next))
    }

    async fn complete_meal(
        &self,
        user_id: Uuid,
        date: Date,
        slot: MealSlot,
        at: OffsetDateTime,
    ) -> Result<CompletionOutcome, StoreError> {
        let mut plans = self.plans.lock().await;
        let Some(plan) = plans.get_mut(&(user_id, date)) else {
            return Ok(CompletionOutcome::NoPlan);
        };
        if !plan.complete_meal(slot, at) {
            return Ok(CompletionOutcome::NotCompletable);
        }
        Ok(CompletionOutcome::Completed(plan.clone()))
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let mut plans = self.plans.lock().await;
        let before = plans.len();
        plans.retain(|(owner, _), _| *owner != user_id);
        Ok((before - plans.len()) as u64)
    }
}
