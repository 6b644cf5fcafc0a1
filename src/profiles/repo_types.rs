use sqlx::FromRow;
use uuid::Uuid;

use super::dto::UserProfile;

/// Profile columns of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<String>,       // male | female | NULL
    pub food_style: Option<String>, // veg | nonveg
    pub country: Option<String>,
    pub region: Option<String>,
    pub health_goal: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(r: ProfileRow) -> Self {
        // Unknown tags degrade to "not set" rather than failing the read.
        Self {
            user_id: r.id,
            name: r.name,
            email: r.email,
            age: r.age.and_then(|a| u32::try_from(a).ok()),
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            sex: r.sex.and_then(|s| s.parse().ok()).unwrap_or_default(),
            diet: r.food_style.and_then(|s| s.parse().ok()).unwrap_or_default(),
            country: r.country.and_then(|s| s.parse().ok()),
            region: r.region.and_then(|s| s.parse().ok()),
            goal: r.health_goal.and_then(|s| s.parse().ok()),
        }
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::profiles::dto::{Country, DietaryStyle, Region, Sex};

    #[test]
    fn row_with_unknown_tags_maps_to_defaults() {
        let row = ProfileRow {
            id: Uuid::new_v4(),
            email: Some("a@b.c".into()),
            name: None,
            age: Some(-3),
            height_cm: Some(170.0),
            weight_kg: None,
            sex: Some("robot".into()),
            food_style: Some("nonveg".into()),
            country: Some("India".into()),
            region: Some("south".into()),
            health_goal: Some("bulk".into()),
        };
        let p = UserProfile::from(row);
        assert_eq!(p.age, None);
        assert_eq!(p.sex, Sex::Unspecified);
        assert_eq!(p.diet, DietaryStyle::NonVegetarian);
        assert_eq!(p.country, Some(Country::India));
        assert_eq!(p.region, Some(Region::South));
        assert_eq!(p.goal, None);
    }
}
