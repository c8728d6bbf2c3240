use super::handlers::generate_recipes::{__path_generate_recipes, generate_recipes};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(generate_recipes))]
pub struct RecipesApiDoc;

pub fn recipes_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/recipes", state.args.server.root_path),
        post(generate_recipes),
    )
}
