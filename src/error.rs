use thiserror::Error;

/// Engine set up without something it cannot work without.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing recipe search credentials (EDAMAM_APP_ID / EDAMAM_APP_KEY)")]
    MissingSearchCredentials,
}

/// Upstream search failures. These never leave the planner: any of them
/// moves the slot to the next fallback tier.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Network(String),
    #[error("search request timed out")]
    Timeout,
    #[error("search provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed search response: {0}")]
    Malformed(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored plan could not be decoded: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("user {0} not found")]
    UnknownUser(uuid::Uuid),
    #[error("no meal plan found for today")]
    NoPlanToday,
    #[error("meal not found or already completed")]
    MealNotCompletable,
}
