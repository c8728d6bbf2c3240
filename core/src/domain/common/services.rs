use std::sync::Arc;

use crate::domain::meal_plan::{ports::LLMClient, prompt::PromptTemplate};

/// Holds the adapters the domain services run against.
///
/// Cloning is cheap: adapters sit behind an [`Arc`].
#[derive(Debug)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) prompt_template: PromptTemplate,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, prompt_template: PromptTemplate) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            prompt_template,
        }
    }
}

impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            prompt_template: self.prompt_template.clone(),
        }
    }
}
