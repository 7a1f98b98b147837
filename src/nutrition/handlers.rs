use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::repo::{self, NutritionFact};

#[instrument(skip(state))]
pub async fn search_food(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<NutritionFact>, ApiError> {
    let fact = repo::find_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| ApiError::not_found("Food not found"))?;
    Ok(Json(fact))
}

#[instrument(skip(state))]
pub async fn food_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, ApiError> {
    let fact = repo::find_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| ApiError::not_found("Food not found"))?;
    Ok(fact.category)
}

/// Calories per serving normalized by a fixed serving size of 100.
#[instrument(skip(state))]
pub async fn calories_per_serving(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let fact = repo::find_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| ApiError::not_found("Food not found"))?;
    Ok(Json(json!({
        "name": fact.name,
        "cal_per_serv": fact.cal_per_serv / 100.0,
    })))
}

#[instrument(skip(state))]
pub async fn calorie_limit(
    State(state): State<AppState>,
    Path(limit): Path<f64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let facts = repo::list_under_limit(&state.db, limit).await?;
    if facts.is_empty() {
        return Err(ApiError::not_found("No food found for calorie limit"));
    }
    Ok(Json(json!({ "foods": facts })))
}
