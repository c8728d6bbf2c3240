use mealprep_core::domain::{
    meal_plan::{GenerateMealsInput, Preferences, helpers::clean_pantry},
    units::UnitSystem,
};
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /api/recipes`.
///
/// Required fields are checked by the meal plan service so a single
/// message can list every missing one.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipesRequest {
    #[serde(default)]
    pub unit_system: UnitSystem,

    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "172")]
    #[validate(length(max = 32, message = "height is too long"))]
    pub height: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "68")]
    #[validate(length(max = 32, message = "weight is too long"))]
    pub weight: String,

    #[serde(default)]
    #[schema(example = "maintain")]
    #[validate(length(max = 100, message = "goal must be at most 100 characters"))]
    pub goal: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "activity must be at most 100 characters"))]
    pub activity: Option<String>,

    /// Non-string entries are dropped.
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["chicken", "rice", "pumpkin"]))]
    pub pantry: Vec<Value>,

    #[serde(default)]
    pub prefs: Preferences,

    #[serde(default)]
    #[validate(length(max = 50, message = "spice must be at most 50 characters"))]
    pub spice: Option<String>,

    #[serde(default, deserialize_with = "string_or_list")]
    #[validate(length(max = 20, message = "at most 20 appliances"))]
    pub appliances: Vec<String>,
}

impl GenerateRecipesRequest {
    pub fn into_input(self) -> GenerateMealsInput {
        GenerateMealsInput {
            unit_system: self.unit_system,
            height: self.height.trim().to_string(),
            weight: self.weight.trim().to_string(),
            goal: self.goal.trim().to_string(),
            activity: non_blank(self.activity),
            pantry: clean_pantry(&self.pantry),
            prefs: self.prefs,
            spice: non_blank(self.spice),
            appliances: self
                .appliances
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or a number, got {other}"
        ))),
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => s.split(',').map(str::to_string).collect(),
        Some(OneOrMany::Many(items)) => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> GenerateRecipesRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_numbers_and_strings_are_accepted_for_measurements() {
        let request = parse(json!({ "height": 172, "weight": "68.5", "goal": "gain" }));

        assert_eq!(request.height, "172");
        assert_eq!(request.weight, "68.5");
        assert_eq!(request.unit_system, UnitSystem::Metric);
    }

    #[test]
    fn test_missing_fields_default_to_blank() {
        let request = parse(json!({ "height": null }));

        assert!(request.height.is_empty());
        assert!(request.weight.is_empty());
        assert!(request.goal.is_empty());
        assert!(request.pantry.is_empty());
    }

    #[test]
    fn test_boolean_height_is_rejected() {
        assert!(serde_json::from_value::<GenerateRecipesRequest>(json!({ "height": true })).is_err());
    }

    #[test]
    fn test_into_input_cleans_pantry_and_options() {
        let input = parse(json!({
            "unitSystem": "imperial",
            "height": " 70 ",
            "weight": 154,
            "goal": " lose ",
            "activity": "  ",
            "pantry": [" eggs ", 3, "eggs", "", "spinach", null],
            "prefs": { "vegetarian": true },
            "spice": "hot",
            "appliances": "oven, microwave"
        }))
        .into_input();

        assert_eq!(input.unit_system, UnitSystem::Imperial);
        assert_eq!(input.height, "70");
        assert_eq!(input.weight, "154");
        assert_eq!(input.goal, "lose");
        assert_eq!(input.activity, None);
        assert_eq!(input.pantry, vec!["eggs", "spinach"]);
        assert!(input.prefs.vegetarian);
        assert_eq!(input.spice.as_deref(), Some("hot"));
        assert_eq!(input.appliances, vec!["oven", "microwave"]);
    }

    #[test]
    fn test_overlong_goal_fails_validation() {
        let request = parse(json!({ "goal": "x".repeat(101) }));
        assert!(request.validate().is_err());
    }
}
