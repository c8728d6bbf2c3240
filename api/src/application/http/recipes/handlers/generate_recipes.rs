use axum::extract::State;
use mealprep_core::domain::meal_plan::{GeneratedMeals, MealPlanService};

use crate::application::http::{
    recipes::validators::GenerateRecipesRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    summary = "Generate a spooky meal plan",
    description = "Builds a prompt from the body metrics, goal and pantry, asks the model for 3 to 6 meals and validates what comes back. Unusable model output is reported with an empty `meals` list and an `error` message.",
    request_body = GenerateRecipesRequest,
    responses(
        (status = 200, body = GeneratedMeals),
        (status = 400, body = ApiErrorResponse, description = "Missing or invalid input"),
        (status = 500, body = ApiErrorResponse, description = "The model could not be reached")
    )
)]
pub async fn generate_recipes(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateRecipesRequest>,
) -> Result<Response<GeneratedMeals>, ApiError> {
    let result = state
        .service
        .generate_meals(payload.into_input())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
