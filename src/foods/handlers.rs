use axum::extract::{Path, State};
use axum::http::header::REFERER;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::calendar::{self, Weekday};
use crate::error::ApiError;
use crate::format::ResponseFormat;
use crate::state::AppState;
use crate::views;

use super::dto::{CreatedFoodResponse, DeletedCountResponse, FoodPayload};
use super::repo;

#[instrument(skip(state))]
pub async fn week_view(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let foods = repo::list_all(&state.db).await?;
    if format.is_json() {
        return Ok(Json(json!({ "foods": foods })).into_response());
    }
    let today = Weekday::today(OffsetDateTime::now_utc());
    let week = calendar::organize_week(foods, today);
    Ok(Html(views::week_page(&week)).into_response())
}

#[instrument(skip(state))]
pub async fn day_view(
    State(state): State<AppState>,
    format: ResponseFormat,
    Path(weekday): Path<String>,
) -> Result<Response, ApiError> {
    // Unrecognized day names fall back to monday instead of 404ing.
    let day = Weekday::from_name(&weekday).unwrap_or(Weekday::Monday);
    let foods = repo::list_by_weekday(&state.db, day.as_str()).await?;
    let today = Weekday::today(OffsetDateTime::now_utc());
    let view = calendar::organize_day(foods, day, today);
    if format.is_json() {
        return Ok(Json(view).into_response());
    }
    Ok(Html(views::day_page(&view)).into_response())
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    format: ResponseFormat,
    payload: FoodPayload,
) -> Result<Response, ApiError> {
    let created = repo::insert(&state.db, &payload.0).await?;
    if format.is_json() {
        return Ok(Json(CreatedFoodResponse {
            message: "Food created successfully",
            id: created.id,
        })
        .into_response());
    }
    Ok(Redirect::to("/").into_response())
}

#[instrument(skip(state))]
pub async fn edit_food_page(
    State(state): State<AppState>,
    format: ResponseFormat,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match repo::get(&state.db, id).await? {
        Some(food) if format.is_json() => Ok(Json(json!({ "food": food })).into_response()),
        Some(food) => Ok(Html(views::edit_page(&food)).into_response()),
        None => Ok(not_found(format, "Food item not found")),
    }
}

#[instrument(skip(state, payload))]
pub async fn edit_food(
    State(state): State<AppState>,
    format: ResponseFormat,
    Path(id): Path<Uuid>,
    payload: FoodPayload,
) -> Result<Response, ApiError> {
    let matched = repo::replace(&state.db, id, &payload.0).await?;
    if matched == 0 {
        return Ok(not_found(format, "Food item not found"));
    }
    if format.is_json() {
        return Ok(Json(json!({ "message": "Food updated successfully" })).into_response());
    }
    Ok(Redirect::to("/").into_response())
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    format: ResponseFormat,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let deleted = repo::delete(&state.db, id).await?;
    if format.is_json() {
        if deleted == 0 {
            return Ok(not_found(format, "Food item not found"));
        }
        return Ok(Json(json!({ "message": "Food deleted successfully" })).into_response());
    }
    Ok(Redirect::to(&redirect_target(&headers)).into_response())
}

#[instrument(skip(state))]
pub async fn delete_day(
    State(state): State<AppState>,
    format: ResponseFormat,
    Path(weekday): Path<String>,
) -> Result<Response, ApiError> {
    let deleted = repo::delete_by_weekday(&state.db, &weekday).await?;
    if format.is_json() {
        return Ok(Json(DeletedCountResponse::new(deleted)).into_response());
    }
    Ok(Redirect::to("/").into_response())
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    format: ResponseFormat,
    Path((weekday, meal)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let deleted = repo::delete_by_meal(&state.db, &weekday, &meal).await?;
    if format.is_json() {
        return Ok(Json(DeletedCountResponse::new(deleted)).into_response());
    }
    Ok(Redirect::to(&format!("/day/{weekday}")).into_response())
}

#[instrument(skip(state))]
pub async fn delete_week(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let deleted = repo::delete_all(&state.db).await?;
    if format.is_json() {
        return Ok(Json(DeletedCountResponse::new(deleted)).into_response());
    }
    Ok(Redirect::to("/").into_response())
}

/// Zero matches is still a success here; the response always carries the
/// count.
#[instrument(skip(state))]
pub async fn delete_by_content(
    State(state): State<AppState>,
    Path((name, weekday, meal)): Path<(String, String, String)>,
) -> Result<Json<DeletedCountResponse>, ApiError> {
    let deleted = repo::delete_by_content(&state.db, &name, &weekday, &meal).await?;
    Ok(Json(DeletedCountResponse::new(deleted)))
}

fn not_found(format: ResponseFormat, message: &str) -> Response {
    if format.is_json() {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response();
    }
    (StatusCode::NOT_FOUND, Html(views::error_page(message))).into_response()
}

/// Single-entry deletes return to the page they came from: a day view
/// when the Referer points at one, the week view otherwise.
fn redirect_target(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|r| r.find("/day/").map(|i| r[i..].to_string()))
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn delete_redirect_follows_day_referer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_static("http://localhost:3000/day/tuesday"),
        );
        assert_eq!(redirect_target(&headers), "/day/tuesday");
    }

    #[test]
    fn delete_redirect_defaults_to_week_view() {
        assert_eq!(redirect_target(&HeaderMap::new()), "/");

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("http://localhost:3000/"));
        assert_eq!(redirect_target(&headers), "/");
    }
}
