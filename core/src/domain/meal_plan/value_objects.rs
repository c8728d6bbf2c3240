use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{meal_plan::entities::Meal, units::UnitSystem};

/// Dietary flags forwarded to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub vegetarian: bool,
    pub vegan: bool,
    pub dairy_free: bool,
    pub gluten_free: bool,
}

impl Preferences {
    /// Names of the active flags, in wire spelling.
    pub fn active_flags(&self) -> Vec<&'static str> {
        [
            (self.vegetarian, "vegetarian"),
            (self.vegan, "vegan"),
            (self.dairy_free, "dairyFree"),
            (self.gluten_free, "glutenFree"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateMealsInput {
    pub unit_system: UnitSystem,
    pub height: String,
    pub weight: String,
    pub goal: String,
    pub activity: Option<String>,
    pub pantry: Vec<String>,
    pub prefs: Preferences,
    pub spice: Option<String>,
    pub appliances: Vec<String>,
}

/// Outcome of a generation. A degraded result carries no meals and a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedMeals {
    pub meals: Vec<Meal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GeneratedMeals {
    pub fn meals(meals: Vec<Meal>) -> Self {
        Self { meals, error: None }
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            meals: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
