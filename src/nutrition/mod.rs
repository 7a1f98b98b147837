pub mod handlers;
pub mod repo;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search_database/:name", get(handlers::search_food))
        .route("/search_database/:name/category", get(handlers::food_category))
        .route(
            "/search_database/:name/find_calperserv",
            get(handlers::calories_per_serving),
        )
        .route(
            "/search_database/calorie_limit/:limit",
            get(handlers::calorie_limit),
        )
}
