use axum::Json;
use mealprep_core::domain::{
    meal_plan::helpers::MAX_PANTRY_ITEMS,
    units::UnitSystem,
    wizard::{ACTIVITY_LEVELS, APPLIANCES, GOALS, SPICE_LEVELS, SUGGESTED_INGREDIENTS},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Choices the meal form offers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub default_unit_system: UnitSystem,
    pub goals: Vec<String>,
    pub activity_levels: Vec<String>,
    pub spice_levels: Vec<String>,
    pub appliances: Vec<String>,
    pub suggested_ingredients: Vec<String>,
    pub max_pantry_items: usize,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Form options",
    responses(
        (status = 200, body = FormOptions)
    )
)]
pub async fn get_config() -> Json<FormOptions> {
    Json(FormOptions {
        default_unit_system: UnitSystem::default(),
        goals: owned(&GOALS),
        activity_levels: owned(&ACTIVITY_LEVELS),
        spice_levels: owned(&SPICE_LEVELS),
        appliances: owned(&APPLIANCES),
        suggested_ingredients: owned(&SUGGESTED_INGREDIENTS),
        max_pantry_items: MAX_PANTRY_ITEMS,
    })
}
