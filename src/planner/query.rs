use lazy_static::lazy_static;
use regex::Regex;

use super::keywords::regional_keywords;
use super::sources::{choose, RandomSource};
use crate::plans::dto::MealSlot;
use crate::profiles::dto::{Country, Region, UserProfile};
use crate::recipes::dto::SearchFilters;

/// Everything needed to search for one slot, primary query and fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub slot: MealSlot,
    /// Randomly chosen regional keyword prepended to the base query.
    pub primary: String,
    /// First entry of the keyword list, used alone by the first fallback.
    pub first_keyword: Option<&'static str>,
    pub filters: SearchFilters,
}

/// Space-joined country, region, slot and diet terms.
pub fn base_query(profile: &UserProfile, slot: MealSlot) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(4);
    if let Some(country) = profile.country {
        parts.push(country.as_str());
    }
    if let Some(region) = profile.region.filter(|r| *r != Region::NoPreference) {
        parts.push(region.as_str());
    }
    parts.push(slot.as_str());
    if profile.diet.is_vegetarian() {
        parts.push("vegetarian");
    }
    parts.join(" ")
}

pub fn cuisine_for(country: Option<Country>) -> Option<&'static str> {
    match country? {
        Country::India => Some("Indian"),
        Country::Usa | Country::Canada => Some("American"),
        Country::Uk => Some("British"),
        Country::Australia => Some("Australian"),
        Country::Germany => Some("German"),
        Country::France => Some("French"),
        Country::Japan => Some("Japanese"),
        Country::China => Some("Chinese"),
        Country::Brazil => Some("Brazilian"),
        Country::Mexico => Some("Mexican"),
        Country::Other => None,
    }
}

/// The index only knows a combined lunch/dinner meal type.
pub fn index_meal_type(slot: MealSlot) -> &'static str {
    match slot {
        MealSlot::Breakfast => "Breakfast",
        MealSlot::Lunch | MealSlot::Dinner => "Lunch/Dinner",
        MealSlot::Snack => "Snack",
    }
}

pub fn filters_for(profile: &UserProfile, slot: MealSlot) -> SearchFilters {
    SearchFilters {
        cuisine: cuisine_for(profile.country),
        vegetarian: profile.diet.is_vegetarian(),
        meal_type: index_meal_type(slot),
    }
}

pub fn build_slot_query(
    profile: &UserProfile,
    slot: MealSlot,
    random: &dyn RandomSource,
) -> SlotQuery {
    let keywords = regional_keywords(
        profile.country,
        profile.region,
        profile.diet.is_vegetarian(),
        slot,
    );
    let base = base_query(profile, slot);
    let primary = match choose(random, keywords) {
        Some(kw) => format!("{kw} {base}"),
        None => base,
    };
    SlotQuery {
        slot,
        primary,
        first_keyword: keywords.first().copied(),
        filters: filters_for(profile, slot),
    }
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9_.\-]").unwrap();
    static ref EDGES: Regex = Regex::new(r"^[_.\-]+|[_.\-]+$").unwrap();
}

fn slug(value: &str) -> Option<String> {
    let lowered = value.trim().to_lowercase();
    let underscored = WHITESPACE.replace_all(&lowered, "_");
    let cleaned = DISALLOWED.replace_all(&underscored, "");
    let trimmed = EDGES.replace_all(&cleaned, "");
    let slug: String = trimmed.chars().take(64).collect();
    (!slug.is_empty()).then_some(slug)
}

/// `Edamam-Account-User` header value: a slug of email, then name.
pub fn account_user(profile: &UserProfile) -> String {
    [profile.email.as_deref(), profile.name.as_deref()]
        .into_iter()
        .flatten()
        .find_map(slug)
        .unwrap_or_else(|| "demo_user".to_string())
}

#[cfg(test)]
mod query_tests {
    use super::*;
    use crate::planner::test_utils::FixedRandom;
    use crate::profiles::dto::DietaryStyle;

    fn indian_south_veg() -> UserProfile {
        UserProfile {
            country: Some(Country::India),
            region: Some(Region::South),
            diet: DietaryStyle::Vegetarian,
            ..Default::default()
        }
    }

    #[test]
    fn base_query_order() {
        assert_eq!(
            base_query(&indian_south_veg(), MealSlot::Breakfast),
            "india south breakfast vegetarian"
        );

        let p = UserProfile {
            country: Some(Country::Usa),
            region: Some(Region::NoPreference),
            diet: DietaryStyle::NonVegetarian,
            ..Default::default()
        };
        assert_eq!(base_query(&p, MealSlot::Dinner), "usa dinner");
    }

    #[test]
    fn bare_profile_still_yields_a_query() {
        let p = UserProfile {
            diet: DietaryStyle::NonVegetarian,
            ..Default::default()
        };
        assert_eq!(base_query(&p, MealSlot::Snack), "snack");
    }

    #[test]
    fn primary_query_is_prefixed_with_picked_keyword() {
        let q = build_slot_query(&indian_south_veg(), MealSlot::Breakfast, &FixedRandom(1));
        assert_eq!(q.primary, "dosa india south breakfast vegetarian");
        assert_eq!(q.first_keyword, Some("idli"));
        assert_eq!(
            q.filters,
            SearchFilters {
                cuisine: Some("Indian"),
                vegetarian: true,
                meal_type: "Breakfast",
            }
        );
    }

    #[test]
    fn lunch_and_dinner_share_index_meal_type() {
        assert_eq!(index_meal_type(MealSlot::Lunch), "Lunch/Dinner");
        assert_eq!(index_meal_type(MealSlot::Dinner), "Lunch/Dinner");
        assert_eq!(index_meal_type(MealSlot::Snack), "Snack");
    }

    #[test]
    fn cuisine_lookup() {
        assert_eq!(cuisine_for(Some(Country::Canada)), Some("American"));
        assert_eq!(cuisine_for(Some(Country::Other)), None);
        assert_eq!(cuisine_for(None), None);
    }

    #[test]
    fn account_user_slugs() {
        let mut p = UserProfile {
            email: Some("  Jane.Doe+meals@Example.com ".into()),
            name: Some("Jane Doe".into()),
            ..Default::default()
        };
        assert_eq!(account_user(&p), "jane.doemealsexample.com");

        p.email = Some("@@@".into());
        assert_eq!(account_user(&p), "jane_doe");

        p.name = None;
        assert_eq!(account_user(&p), "demo_user");

        p.name = Some("x".repeat(100));
        assert_eq!(account_user(&p).len(), 64);
    }
}
