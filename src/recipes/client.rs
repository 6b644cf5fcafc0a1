use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use tracing::{debug, warn};

use super::dto::{RecipeCandidate, SearchQuery, SearchResponse};
use super::RecipeSearch;
use crate::config::EdamamConfig;
use crate::error::{ConfigError, SearchError};

/// Fields requested from the index; keeps the payload small.
const FIELDS: [&str; 9] = [
    "label",
    "ingredientLines",
    "yield",
    "calories",
    "totalNutrients",
    "image",
    "url",
    "source",
    "cuisineType",
];

/// Edamam Recipe Search v2 client.
pub struct EdamamClient {
    config: EdamamConfig,
    client: Client,
}

impl EdamamClient {
    pub fn new(config: EdamamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl RecipeSearch for EdamamClient {
    fn check_config(&self) -> Result<(), ConfigError> {
        self.config
            .credentials()
            .map(|_| ())
            .ok_or(ConfigError::MissingSearchCredentials)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeCandidate>, SearchError> {
        let (app_id, app_key) = self
            .config
            .credentials()
            .ok_or(ConfigError::MissingSearchCredentials)?;

        let mut params: Vec<(&str, &str)> = vec![
            ("type", "public"),
            ("q", query.text.as_str()),
            ("app_id", app_id),
            ("app_key", app_key),
            ("random", "true"),
        ];
        params.extend(FIELDS.iter().map(|f| ("field", *f)));
        params.push(("mealType", query.filters.meal_type));
        if query.filters.vegetarian {
            params.push(("health", "vegetarian"));
        }
        if let Some(cuisine) = query.filters.cuisine {
            params.push(("cuisineType", cuisine));
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .header("Edamam-Account-User", &query.account_user)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(status = status.as_u16(), q = %query.text, "edamam search failed");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&text).map_err(|e| SearchError::Malformed(e.to_string()))?;
        debug!(q = %query.text, hits = parsed.hits.len(), "edamam search ok");
        Ok(parsed
            .hits
            .into_iter()
            .map(|h| RecipeCandidate::from(h.recipe))
            .collect())
    }
}
