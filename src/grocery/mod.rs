pub mod dto;
pub mod handlers;
pub mod repo;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/grocery-list",
            get(handlers::grocery_list).post(handlers::add_item),
        )
        .route("/save-week", get(handlers::save_week))
        .route("/grocery-history", get(handlers::grocery_history))
}
