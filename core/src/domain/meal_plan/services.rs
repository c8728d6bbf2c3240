use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    meal_plan::{
        ports::{LLMClient, MealPlanService},
        salvage::{ParsedMeals, parse_model_output},
        schema::get_meal_plan_schema,
        value_objects::{GenerateMealsInput, GeneratedMeals},
    },
    units::to_body_metrics,
};

impl<LLM> MealPlanService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn generate_meals(&self, input: GenerateMealsInput) -> Result<GeneratedMeals, CoreError> {
        // 1. Validate input
        ensure_required_fields(&input)?;

        if input.pantry.iter().all(|item| item.trim().is_empty()) {
            return Err(CoreError::EmptyPantry);
        }

        let metrics = to_body_metrics(
            &input.height,
            input.unit_system,
            &input.weight,
            input.unit_system,
        )?;

        // 2. Build prompt
        let request_id = generate_uuid_v7();
        let prompt = self.prompt_template.render(&input, &metrics);

        info!(
            %request_id,
            pantry_items = input.pantry.len(),
            goal = %input.goal,
            "generating meals"
        );

        // 3. Call LLM
        let raw_response = self
            .llm_client
            .generate_with_text(
                self.prompt_template.system_instruction.clone(),
                prompt,
                get_meal_plan_schema(),
            )
            .await?;

        // 4. Parse, salvage and validate
        let parsed = parse_model_output(&raw_response);
        match &parsed {
            ParsedMeals::Valid(plan) => {
                info!(%request_id, meals = plan.meals.len(), "meals generated");
            }
            ParsedMeals::InvalidShape(reason) => {
                warn!(%request_id, %reason, "model output failed meal plan validation");
            }
            ParsedMeals::Unparsable => {
                warn!(
                    %request_id,
                    response_len = raw_response.len(),
                    "no JSON recoverable from model output"
                );
            }
        }

        Ok(parsed.into_generated())
    }
}

fn ensure_required_fields(input: &GenerateMealsInput) -> Result<(), CoreError> {
    let missing: Vec<&str> = [
        ("height", input.height.as_str()),
        ("weight", input.weight.as_str()),
        ("goal", input.goal.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::MissingFields(missing.join(", ")))
    }
}
