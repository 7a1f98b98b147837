use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use tracing::instrument;

use crate::error::ApiError;
use crate::format::ResponseFormat;
use crate::state::AppState;
use crate::views;

use super::dto::GroceryPayload;
use super::repo;

#[instrument(skip(state))]
pub async fn grocery_list(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let items = repo::list_current(&state.db).await?;
    if format.is_json() {
        return Ok(Json(json!({ "items": items })).into_response());
    }
    Ok(Html(views::grocery_page(&items)).into_response())
}

#[instrument(skip(state, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    format: ResponseFormat,
    payload: GroceryPayload,
) -> Result<Response, ApiError> {
    let added = repo::add_item(&state.db, &payload.0).await?;
    if format.is_json() {
        return Ok(Json(json!({ "message": "Item added", "id": added.id })).into_response());
    }
    let items = repo::list_current(&state.db).await?;
    Ok(Html(views::grocery_page(&items)).into_response())
}

#[instrument(skip(state))]
pub async fn save_week(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let archived = repo::archive_week(&state.db).await?;
    if format.is_json() {
        return Ok(match archived {
            Some(week_id) => {
                Json(json!({ "message": "Week saved", "week_id": week_id })).into_response()
            }
            None => Json(json!({ "message": "Grocery list is empty" })).into_response(),
        });
    }
    Ok(Redirect::to("/grocery-history").into_response())
}

#[instrument(skip(state))]
pub async fn grocery_history(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let history = repo::history(&state.db).await?;
    if format.is_json() {
        return Ok(Json(json!({ "history": history })).into_response());
    }
    Ok(Html(views::history_page(&history)).into_response())
}
