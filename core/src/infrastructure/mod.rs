pub mod llm;
pub mod recipes;
