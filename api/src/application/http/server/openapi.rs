use crate::application::http::{
    health::__path_health, recipes::router::RecipesApiDoc, server::config::__path_get_config,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Spooky Meal Prep API"
    ),
    paths(health, get_config),
    nest(
        (path = "/api", api = RecipesApiDoc),
    )
)]
pub struct ApiDoc;
