use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Number;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Canonical meal shape returned by the model.
///
/// Numeric bounds mirror the response schema sent to the model; see
/// [`crate::domain::meal_plan::schema::get_meal_plan_schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "spookyName must not be empty"))]
    pub spooky_name: String,

    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 1, max = 240, message = "timeMinutes must be between 1 and 240"))]
    pub time_minutes: i64,

    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 50, max = 5000, message = "calories must be between 50 and 5000"))]
    pub calories: i64,

    #[validate(nested)]
    pub macros: Macros,

    #[validate(length(min = 2, message = "at least 2 ingredients are required"))]
    pub ingredients: Vec<MealIngredient>,

    #[validate(length(min = 3, message = "at least 3 steps are required"))]
    pub steps: Vec<String>,
}

/// Grams per macro. Values keep the model's number form (`30` stays `30`,
/// `30.0` stays `30.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Macros {
    #[schema(value_type = f64)]
    #[validate(custom(function = "protein_in_range"))]
    pub protein_g: Number,
    #[schema(value_type = f64)]
    #[validate(custom(function = "carbs_in_range"))]
    pub carbs_g: Number,
    #[schema(value_type = f64)]
    #[validate(custom(function = "fat_in_range"))]
    pub fat_g: Number,
}

fn grams_in_range(value: &Number, max: f64) -> Result<(), ValidationError> {
    match value.as_f64() {
        Some(grams) if (0.0..=max).contains(&grams) => Ok(()),
        _ => Err(ValidationError::new("range")
            .with_message(format!("must be between 0 and {max}").into())),
    }
}

fn protein_in_range(value: &Number) -> Result<(), ValidationError> {
    grams_in_range(value, 300.0)
}

fn carbs_in_range(value: &Number) -> Result<(), ValidationError> {
    grams_in_range(value, 600.0)
}

fn fat_in_range(value: &Number) -> Result<(), ValidationError> {
    grams_in_range(value, 200.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealIngredient {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct MealPlan {
    #[validate(length(min = 3, max = 6, message = "between 3 and 6 meals are required"), nested)]
    pub meals: Vec<Meal>,
}

/// Accepts JSON integers and whole-valued floats (`450.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(de::Error::custom(format!(
            "expected a whole number, got {value}"
        )));
    }
    Ok(value as i64)
}
