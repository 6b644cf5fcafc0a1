pub mod dto;
mod memory;
pub mod repo;
mod repo_types;

pub use dto::{DailyPlan, GenerationKind, Macros, Meal, MealSlot, PlanSummary};
pub use memory::InMemoryPlanStore;
pub use repo::{CompletionOutcome, PgPlanStore, PlanStore};
