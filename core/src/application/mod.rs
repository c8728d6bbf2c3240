use crate::{
    domain::{
        common::{MealPrepConfig, services::Service},
        meal_plan::prompt::PromptTemplate,
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type MealPrepService = Service<GeminiLLMClient>;

pub async fn create_service(config: MealPrepConfig) -> Result<MealPrepService, anyhow::Error> {
    let llm_client = GeminiLLMClient::new(
        config.llm.gemini_api_key,
        config.llm.gemini_model,
        config.llm.gemini_base_url,
    )?;

    tracing::debug!(model = %llm_client.model_name(), "LLM client ready");

    Ok(Service::new(llm_client, PromptTemplate::default()))
}
