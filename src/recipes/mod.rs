mod client;
pub mod dto;

use async_trait::async_trait;

use crate::error::{ConfigError, SearchError};

pub use client::EdamamClient;
pub use dto::{RecipeCandidate, SearchFilters, SearchQuery};

/// Third-party recipe index.
#[async_trait]
pub trait RecipeSearch: Send + Sync {
    /// Fails when the provider cannot be used at all (e.g. no credentials).
    fn check_config(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeCandidate>, SearchError>;
}
