pub mod dto;
pub mod handlers;
pub mod repo;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::week_view))
        .route("/week", get(handlers::week_view))
        .route("/day/:weekday", get(handlers::day_view))
        .route("/create", post(handlers::create_food))
        .route("/edit/:id", get(handlers::edit_food_page).post(handlers::edit_food))
        .route("/delete/:id", get(handlers::delete_food))
        .route("/delete-day/:weekday", post(handlers::delete_day))
        .route("/delete-meal/:weekday/:meal", post(handlers::delete_meal))
        .route("/delete-week", post(handlers::delete_week))
        .route(
            "/delete-by-content/:name/:weekday/:meal",
            delete(handlers::delete_by_content),
        )
}
