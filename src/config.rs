use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_EDAMAM_BASE_URL: &str = "https://api.edamam.com/api/recipes/v2";
pub const DEFAULT_DAILY_GENERATION_LIMIT: u32 = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct EdamamConfig {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl EdamamConfig {
    /// Both credentials, or `None` when either one is missing or blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.app_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.app_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((id, key))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EdamamConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            base_url: DEFAULT_EDAMAM_BASE_URL.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    pub daily_generation_limit: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_generation_limit: DEFAULT_DAILY_GENERATION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub edamam: EdamamConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let edamam = EdamamConfig {
            app_id: std::env::var("EDAMAM_APP_ID").ok(),
            app_key: std::env::var("EDAMAM_APP_KEY").ok(),
            base_url: std::env::var("EDAMAM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_EDAMAM_BASE_URL.into()),
            timeout_secs: std::env::var("SEARCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        let planner = PlannerConfig {
            daily_generation_limit: std::env::var("DAILY_GENERATION_LIMIT")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(DEFAULT_DAILY_GENERATION_LIMIT),
        };
        Ok(Self {
            database_url,
            edamam,
            planner,
        })
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn credentials_require_both_values() {
        let mut cfg = EdamamConfig::default();
        assert!(cfg.credentials().is_none());

        cfg.app_id = Some("id".into());
        assert!(cfg.credentials().is_none());

        cfg.app_key = Some("   ".into());
        assert!(cfg.credentials().is_none());

        cfg.app_key = Some("key".into());
        assert_eq!(cfg.credentials(), Some(("id", "key")));
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = EdamamConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_EDAMAM_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(PlannerConfig::default().daily_generation_limit, 3);
    }
}
