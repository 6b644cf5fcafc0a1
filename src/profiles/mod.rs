pub mod dto;
pub mod repo;
mod repo_types;

pub use dto::{Country, DietaryStyle, HealthGoal, Region, Sex, UserProfile};
pub use repo::{InMemoryUserStore, PgUserStore, UserStore};
