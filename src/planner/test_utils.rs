//! Deterministic stand-ins for the planner's collaborators.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::sources::{Clock, RandomSource};
use crate::error::SearchError;
use crate::profiles::dto::{Country, DietaryStyle, HealthGoal, Region, Sex, UserProfile};
use crate::recipes::dto::{RecipeCandidate, SearchFilters, SearchQuery};
use crate::recipes::RecipeSearch;

/// Always picks the same index, clamped to the list length.
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

pub struct FixedClock(pub Mutex<OffsetDateTime>);

impl FixedClock {
    pub fn at(now: OffsetDateTime) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: OffsetDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        *self.0.lock().unwrap()
    }
}

enum Unmatched {
    Fail,
    Empty,
}

/// Answers by exact query text; anything else fails or returns no hits.
pub struct ScriptedSearch {
    responses: HashMap<String, Vec<RecipeCandidate>>,
    unmatched: Unmatched,
    delay: Option<Duration>,
    log: Mutex<Vec<SearchQuery>>,
}

impl ScriptedSearch {
    fn new(unmatched: Unmatched) -> Self {
        Self {
            responses: HashMap::new(),
            unmatched,
            delay: None,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(Unmatched::Fail)
    }

    pub fn empty() -> Self {
        Self::new(Unmatched::Empty)
    }

    pub fn with(mut self, text: &str, candidates: Vec<RecipeCandidate>) -> Self {
        self.responses.insert(text.to_string(), candidates);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|q| q.text.clone()).collect()
    }

    pub fn filters(&self) -> Vec<SearchFilters> {
        self.log.lock().unwrap().iter().map(|q| q.filters.clone()).collect()
    }

    pub fn account_users(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|q| q.account_user.clone()).collect()
    }
}

#[async_trait]
impl RecipeSearch for ScriptedSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeCandidate>, SearchError> {
        self.log.lock().unwrap().push(query.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match (self.responses.get(&query.text), &self.unmatched) {
            (Some(c), _) => Ok(c.clone()),
            (None, Unmatched::Empty) => Ok(Vec::new()),
            (None, Unmatched::Fail) => Err(SearchError::Status {
                status: 503,
                body: "unavailable".into(),
            }),
        }
    }
}

pub fn candidate(name: &str, total_calories: f64, servings: f64) -> RecipeCandidate {
    RecipeCandidate {
        name: name.into(),
        servings: Some(servings),
        total_calories: Some(total_calories),
        source: Some("Test Kitchen".into()),
        url: Some(format!("https://example.com/{}", name.to_lowercase().replace(' ', "-"))),
        ..Default::default()
    }
}

/// 30-year-old male, 175 cm, 70 kg, maintenance goal: 2308 kcal/day.
pub fn reference_profile() -> UserProfile {
    UserProfile {
        user_id: Uuid::new_v4(),
        name: Some("Test User".into()),
        email: Some("test@example.com".into()),
        age: Some(30),
        height_cm: Some(175.0),
        weight_kg: Some(70.0),
        sex: Sex::Male,
        diet: DietaryStyle::Vegetarian,
        country: Some(Country::India),
        region: Some(Region::South),
        goal: Some(HealthGoal::Maintenance),
    }
}
