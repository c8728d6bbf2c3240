use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::value_objects::{GenerateMealsInput, GeneratedMeals},
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_text(
        &self,
        system_instruction: String,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for meal plan generation
pub trait MealPlanService: Send + Sync {
    /// Errors only for bad input or a failed model call. Unusable model output
    /// yields [`GeneratedMeals::degraded`].
    fn generate_meals(
        &self,
        input: GenerateMealsInput,
    ) -> impl Future<Output = Result<GeneratedMeals, CoreError>> + Send;
}
