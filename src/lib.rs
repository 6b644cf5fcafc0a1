pub mod config;
pub mod error;
pub mod planner;
pub mod plans;
pub mod profiles;
pub mod recipes;
pub mod state;
