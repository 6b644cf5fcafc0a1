use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use serde::Serialize;
use time::{Date, OffsetDateTime};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::energy::{distribute, target_daily_calories};
use super::fallback::{search_and_select, FallbackChain};
use super::normalize::meal_from_candidate;
use super::policy::{GenerationPolicy, GenerationStatus, RateLimitRejection};
use super::query::{account_user, build_slot_query};
use super::sources::{Clock, RandomSource, SystemClock, ThreadRandom};
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::plans::dto::{DailyPlan, GenerationKind, Meal, MealSlot};
use crate::plans::repo::{CompletionOutcome, PlanStore};
use crate::profiles::dto::UserProfile;
use crate::profiles::repo::UserStore;
use crate::recipes::dto::SearchQuery;
use crate::recipes::RecipeSearch;

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Generated(DailyPlan),
    RateLimited(RateLimitRejection),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AutoGeneration {
    Generated(DailyPlan),
    /// Today's plan was already stamped by a generation.
    NotNeeded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

type UserLocks = StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>;

/// Holds one user's generation lock. Dropping it releases the lock and
/// removes the map entry once nobody else holds or waits on it.
struct UserLockGuard<'a> {
    locks: &'a UserLocks,
    user_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserLockGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(&self.user_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.user_id);
        }
    }
}

/// Builds, stores and serves daily meal plans.
pub struct MealPlanner {
    search: Arc<dyn RecipeSearch>,
    plans: Arc<dyn PlanStore>,
    users: Arc<dyn UserStore>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    policy: GenerationPolicy,
    search_timeout: Duration,
    user_locks: UserLocks,
}

impl MealPlanner {
    pub fn new(
        config: &PlannerConfig,
        search_timeout: Duration,
        search: Arc<dyn RecipeSearch>,
        plans: Arc<dyn PlanStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            search,
            plans,
            users,
            random: Arc::new(ThreadRandom),
            clock: Arc::new(SystemClock),
            policy: GenerationPolicy::new(config.daily_generation_limit),
            search_timeout,
            user_locks: StdMutex::new(HashMap::new()),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn today(&self) -> (OffsetDateTime, Date) {
        let now = self.clock.now();
        (now, now.date())
    }

    /// Generations for one user run one at a time.
    async fn lock_user(&self, user_id: Uuid) -> UserLockGuard<'_> {
        let lock = self
            .user_locks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(user_id)
            .or_default()
            .clone();
        UserLockGuard {
            locks: &self.user_locks,
            user_id,
            guard: Some(lock.lock_owned().await),
        }
    }

    #[cfg(test)]
    fn held_user_locks(&self) -> usize {
        self.user_locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    async fn fill_slot(
        &self,
        profile: &UserProfile,
        slot: MealSlot,
        sub_target: i32,
        account_user: &str,
    ) -> Meal {
        let slot_query = build_slot_query(profile, slot, self.random.as_ref());
        let primary = SearchQuery {
            text: slot_query.primary.clone(),
            filters: slot_query.filters.clone(),
            account_user: account_user.to_string(),
        };
        if let Some(candidate) =
            search_and_select(self.search.as_ref(), self.search_timeout, &primary, sub_target).await
        {
            return meal_from_candidate(slot, candidate);
        }

        FallbackChain {
            search: self.search.as_ref(),
            random: self.random.as_ref(),
            timeout: self.search_timeout,
            account_user,
        }
        .recover(&slot_query, sub_target)
        .await
    }

    /// Target, sub-targets and one meal per slot. Never touches the store.
    pub async fn assemble(&self, profile: &UserProfile, date: Date) -> DailyPlan {
        let target = target_daily_calories(profile);
        let [breakfast, lunch, snack, dinner] = distribute(target);
        let account_user = account_user(profile);

        let (breakfast, lunch, snack, dinner) = tokio::join!(
            self.fill_slot(profile, breakfast.0, breakfast.1, &account_user),
            self.fill_slot(profile, lunch.0, lunch.1, &account_user),
            self.fill_slot(profile, snack.0, snack.1, &account_user),
            self.fill_slot(profile, dinner.0, dinner.1, &account_user),
        );

        DailyPlan::fresh(
            profile.user_id,
            date,
            target,
            vec![breakfast, lunch, snack, dinner],
        )
    }

    /// User-requested generation, limited per day.
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub async fn generate_plan(
        &self,
        profile: &UserProfile,
    ) -> Result<GenerationOutcome, PlannerError> {
        self.search.check_config()?;
        let _guard = self.lock_user(profile.user_id).await;
        let (now, today) = self.today();

        let existing = self.plans.find(profile.user_id, today).await?;
        if let Err(rejection) = self.policy.check_manual(existing.as_ref()) {
            info!(count = rejection.generation_count, "daily generation limit reached");
            return Ok(GenerationOutcome::RateLimited(rejection));
        }

        let fresh = self.assemble(profile, today).await;
        match self
            .plans
            .apply_generation(&fresh, GenerationKind::Manual, now, self.policy.limit())
            .await
        {
            Ok(Some(plan)) => {
                info!(
                    calories = plan.summary.calories,
                    count = plan.daily_generation_count,
                    "meal plan generated"
                );
                Ok(GenerationOutcome::Generated(plan))
            }
            Ok(None) => {
                let current = self.plans.find(profile.user_id, today).await?;
                let rejection = self
                    .policy
                    .check_manual(current.as_ref())
                    .err()
                    .unwrap_or(RateLimitRejection {
                        generation_count: self.policy.limit(),
                        remaining_generations: 0,
                        limit: self.policy.limit(),
                    });
                warn!("generation quota used up while the plan was being built");
                Ok(GenerationOutcome::RateLimited(rejection))
            }
            Err(e) => {
                error!(error = %e, "failed to save meal plan; returning it unsaved");
                let plan = self
                    .policy
                    .apply(existing.as_ref(), fresh.clone(), GenerationKind::Manual, now)
                    .unwrap_or(fresh);
                Ok(GenerationOutcome::Generated(plan))
            }
        }
    }

    /// Generation on the user's behalf. Leaves stamped plans alone.
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub async fn generate_automatic(
        &self,
        profile: &UserProfile,
    ) -> Result<AutoGeneration, PlannerError> {
        self.search.check_config()?;
        let _guard = self.lock_user(profile.user_id).await;
        let (now, today) = self.today();

        let existing = self.plans.find(profile.user_id, today).await?;
        if !GenerationPolicy::needs_automatic(existing.as_ref()) {
            return Ok(AutoGeneration::NotNeeded);
        }

        let fresh = self.assemble(profile, today).await;
        match self
            .plans
            .apply_generation(&fresh, GenerationKind::Automatic, now, self.policy.limit())
            .await
        {
            Ok(Some(plan)) => {
                info!(calories = plan.summary.calories, "automatic meal plan generated");
                Ok(AutoGeneration::Generated(plan))
            }
            Ok(None) => Ok(AutoGeneration::NotNeeded),
            Err(e) => {
                error!(error = %e, "failed to save automatic meal plan; returning it unsaved");
                let plan = self
                    .policy
                    .apply(existing.as_ref(), fresh.clone(), GenerationKind::Automatic, now)
                    .unwrap_or(fresh);
                Ok(AutoGeneration::Generated(plan))
            }
        }
    }

    pub async fn needs_automatic_generation(&self, user_id: Uuid) -> Result<bool, PlannerError> {
        let (_, today) = self.today();
        let plan = self.plans.find(user_id, today).await?;
        Ok(GenerationPolicy::needs_automatic(plan.as_ref()))
    }

    pub async fn generation_status(&self, user_id: Uuid) -> Result<GenerationStatus, PlannerError> {
        let (_, today) = self.today();
        let plan = self.plans.find(user_id, today).await?;
        Ok(self.policy.status(plan.as_ref()))
    }

    /// Today's plan, generated automatically when there is none yet.
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub async fn todays_plan(&self, profile: &UserProfile) -> Result<DailyPlan, PlannerError> {
        let (_, today) = self.today();
        if let Some(plan) = self.plans.find(profile.user_id, today).await? {
            return Ok(plan);
        }
        match self.generate_automatic(profile).await? {
            AutoGeneration::Generated(plan) => Ok(plan),
            AutoGeneration::NotNeeded => self
                .plans
                .find(profile.user_id, today)
                .await?
                .ok_or(PlannerError::NoPlanToday),
        }
    }

    #[instrument(skip(self))]
    pub async fn complete_meal(
        &self,
        user_id: Uuid,
        slot: MealSlot,
    ) -> Result<DailyPlan, PlannerError> {
        let (now, today) = self.today();
        match self.plans.complete_meal(user_id, today, slot, now).await? {
            CompletionOutcome::Completed(plan) => {
                info!(consumed = plan.consumed_calories, "meal completed");
                Ok(plan)
            }
            CompletionOutcome::NoPlan => Err(PlannerError::NoPlanToday),
            CompletionOutcome::NotCompletable => Err(PlannerError::MealNotCompletable),
        }
    }

    /// Removes every stored plan of a user that is being deleted.
    pub async fn delete_user_plans(&self, user_id: Uuid) -> Result<u64, PlannerError> {
        let removed = self.plans.delete_for_user(user_id).await?;
        info!(%user_id, removed, "meal plans deleted");
        Ok(removed)
    }

    async fn profile(&self, user_id: Uuid) -> Result<UserProfile, PlannerError> {
        self.users
            .profile(user_id)
            .await?
            .ok_or(PlannerError::UnknownUser(user_id))
    }

    /// Automatic generation for every known user that still needs one today.
    /// A failing user is logged and counted; the sweep carries on.
    #[instrument(skip(self))]
    pub async fn run_automatic_sweep(&self) -> Result<SweepReport, PlannerError> {
        self.search.check_config()?;
        let user_ids = self.users.list_user_ids().await?;
        let mut report = SweepReport {
            total: user_ids.len(),
            ..Default::default()
        };

        for user_id in user_ids {
            let result = match self.profile(user_id).await {
                Ok(profile) => self.generate_automatic(&profile).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(AutoGeneration::Generated(_)) => report.generated += 1,
                Ok(AutoGeneration::NotNeeded) => report.skipped += 1,
                Err(e) => {
                    warn!(%user_id, error = %e, "automatic generation failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            generated = report.generated,
            skipped = report.skipped,
            failed = report.failed,
            total = report.total,
            "automatic sweep finished"
        );
        Ok(report)
    }
}
