pub mod energy;
pub mod fallback;
pub mod keywords;
pub mod normalize;
pub mod policy;
pub mod query;
pub mod selector;
pub mod services;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_utils;

pub use policy::{GenerationPolicy, GenerationStatus, RateLimitRejection};
pub use services::{AutoGeneration, GenerationOutcome, MealPlanner, SweepReport};
pub use sources::{Clock, RandomSource, SystemClock, ThreadRandom};
