use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::Meal,
        value_objects::{GenerateMealsInput, GeneratedMeals, Preferences},
    },
    units::UnitSystem,
};

/// Calls the recipes endpoint of a running API server.
#[derive(Debug, Clone)]
pub struct HttpRecipesClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRequestBody<'a> {
    unit_system: UnitSystem,
    height: &'a str,
    weight: &'a str,
    goal: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity: Option<&'a str>,
    pantry: &'a [String],
    prefs: &'a Preferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    spice: Option<&'a str>,
    appliances: &'a [String],
}

#[derive(Debug, Deserialize)]
struct RecipeResponseBody {
    #[serde(default)]
    meals: Vec<Meal>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpRecipesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub async fn generate(&self, input: &GenerateMealsInput) -> Result<GeneratedMeals, CoreError> {
        let url = format!("{}/api/recipes", self.base_url);
        let body = RecipeRequestBody {
            unit_system: input.unit_system,
            height: &input.height,
            weight: &input.weight,
            goal: &input.goal,
            activity: input.activity.as_deref(),
            pantry: &input.pantry,
            prefs: &input.prefs,
            spice: input.spice.as_deref(),
            appliances: &input.appliances,
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            tracing::error!("Recipes request failed: {}", e);
            CoreError::ExternalServiceError(format!("Could not reach the recipes API: {}", e))
        })?;

        let status = response.status();
        let payload: RecipeResponseBody = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse recipes response ({}): {}", status, e);
            CoreError::ExternalServiceError(format!("Server error ({status})"))
        })?;

        if !status.is_success() {
            return Err(CoreError::ExternalServiceError(
                payload.error.unwrap_or_else(|| format!("Server error ({status})")),
            ));
        }

        Ok(GeneratedMeals {
            meals: payload.meals,
            error: payload.error,
        })
    }
}
