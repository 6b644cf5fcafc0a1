use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::UserProfile;
use super::repo_types::ProfileRow;
use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError>;
    async fn list_user_ids(&self) -> Result<Vec<Uuid>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, name, age, height_cm, weight_kg, sex,
                   food_style, country, region, health_goal
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(UserProfile::from))
    }

    async fn list_user_ids(&self) -> Result<Vec<Uuid>, StoreError> {
        let ids = sqlx::query_scalar::<_, Uuid>(r#"SELECT id FROM users ORDER BY created_at ASC"#)
            .fetch_all(&self.db)
            .await?;
        Ok(ids)
    }
}

/// Process-local profiles, for tests and local runs without a database.
#[derive(Default)]
pub struct InMemoryUserStore {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryUserStore {
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let map = profiles.into_iter().map(|p| (p.user_id, p)).collect();
        Self {
            profiles: RwLock::new(map),
        }
    }

    pub fn insert(&self, profile: UserProfile) {
        let mut guard = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(profile.user_id, profile);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.get(&user_id).cloned())
    }

    async fn list_user_ids(&self) -> Result<Vec<Uuid>, StoreError> {
        let guard = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<Uuid> = guard.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
