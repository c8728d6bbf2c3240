use std::sync::Arc;

use mealprep_core::application::MealPrepService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MealPrepService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MealPrepService) -> Self {
        Self { args, service }
    }
}
