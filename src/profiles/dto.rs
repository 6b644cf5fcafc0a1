use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietaryStyle {
    #[default]
    #[serde(rename = "veg", alias = "vegetarian")]
    Vegetarian,
    #[serde(rename = "nonveg", alias = "non-vegetarian")]
    NonVegetarian,
}

impl DietaryStyle {
    pub fn is_vegetarian(self) -> bool {
        matches!(self, DietaryStyle::Vegetarian)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    GeneralHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    India,
    Usa,
    Uk,
    Canada,
    Australia,
    Germany,
    France,
    Japan,
    China,
    Brazil,
    Mexico,
    Other,
}

impl Country {
    pub fn as_str(self) -> &'static str {
        match self {
            Country::India => "india",
            Country::Usa => "usa",
            Country::Uk => "uk",
            Country::Canada => "canada",
            Country::Australia => "australia",
            Country::Germany => "germany",
            Country::France => "france",
            Country::Japan => "japan",
            Country::China => "china",
            Country::Brazil => "brazil",
            Country::Mexico => "mexico",
            Country::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    NoPreference,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
            Region::Central => "central",
            Region::Northeast => "northeast",
            Region::Northwest => "northwest",
            Region::Southeast => "southeast",
            Region::Southwest => "southwest",
            Region::NoPreference => "no-preference",
        }
    }
}

/// Parses the lowercase tags stored with the user record. Matching is
/// case-insensitive because older rows were written with capitalised names.
macro_rules! parse_via_serde {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = serde_json::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
            }
        }
    )*};
}

parse_via_serde!(Sex, DietaryStyle, HealthGoal, Country, Region);

/// Biometric and preference data the planner reads. Owned by user
/// management; the planner never writes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub diet: DietaryStyle,
    pub country: Option<Country>,
    pub region: Option<Region>,
    pub goal: Option<HealthGoal>,
}
