use serde::Serialize;
use time::OffsetDateTime;

use crate::plans::dto::{DailyPlan, GenerationKind};

/// Returned instead of a plan once today's quota is used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitRejection {
    pub generation_count: i32,
    pub remaining_generations: i32,
    pub limit: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationStatus {
    pub can_generate: bool,
    pub generation_count: i32,
    pub manual_generation_count: i32,
    pub remaining_generations: i32,
    pub limit: i32,
    pub is_auto_generated: bool,
}

/// Daily generation rules for one user's plan record.
#[derive(Debug, Clone, Copy)]
pub struct GenerationPolicy {
    limit: i32,
}

impl GenerationPolicy {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: i32::try_from(limit).unwrap_or(i32::MAX).max(1),
        }
    }

    pub fn limit(&self) -> i32 {
        self.limit
    }

    pub fn status(&self, today: Option<&DailyPlan>) -> GenerationStatus {
        let count = today.map_or(0, |p| p.daily_generation_count);
        GenerationStatus {
            can_generate: count < self.limit,
            generation_count: count,
            manual_generation_count: today.map_or(0, |p| p.manual_generation_count),
            remaining_generations: (self.limit - count).max(0),
            limit: self.limit,
            is_auto_generated: today.is_some_and(DailyPlan::is_auto_generated),
        }
    }

    pub fn check_manual(&self, today: Option<&DailyPlan>) -> Result<(), RateLimitRejection> {
        let status = self.status(today);
        if status.can_generate {
            Ok(())
        } else {
            Err(RateLimitRejection {
                generation_count: status.generation_count,
                remaining_generations: status.remaining_generations,
                limit: self.limit,
            })
        }
    }

    /// Automatic generation only fills an empty day or replaces a plan that
    /// no generation has stamped yet.
    pub fn needs_automatic(today: Option<&DailyPlan>) -> bool {
        today.map_or(true, |p| p.origin.is_none())
    }

    /// Read-modify-write step applied atomically by the plan store. Returns
    /// the record to persist, or `None` when the write must not happen.
    pub fn apply(
        &self,
        existing: Option<&DailyPlan>,
        fresh: DailyPlan,
        kind: GenerationKind,
        at: OffsetDateTime,
    ) -> Option<DailyPlan> {
        let (manual, daily) = match kind {
            GenerationKind::Manual => {
                if self.check_manual(existing).is_err() {
                    return None;
                }
                let (m, d) = existing.map_or((0, 0), |p| {
                    (p.manual_generation_count, p.daily_generation_count)
                });
                (m + 1, d + 1)
            }
            GenerationKind::Automatic => {
                if !Self::needs_automatic(existing) {
                    return None;
                }
                existing.map_or((0, 0), |p| {
                    (p.manual_generation_count, p.daily_generation_count)
                })
            }
        };

        Some(DailyPlan {
            origin: Some(kind),
            manual_generation_count: manual,
            daily_generation_count: daily,
            last_generated_at: Some(at),
            ..fresh
        })
    }
}
