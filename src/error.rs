use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::format::ResponseFormat;
use crate::views;

/// Error taxonomy for every route: bad input, missing record, or anything
/// else (rendered as a generic 500 with the error's description).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound("record not found".into()),
            other => Self::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Extractor rejection carrying the format negotiated for the request, so
/// a bad form submission gets the HTML error page while a bad JSON body
/// gets the JSON error shape.
#[derive(Debug)]
pub struct PayloadError {
    pub format: ResponseFormat,
    pub error: ApiError,
}

impl IntoResponse for PayloadError {
    fn into_response(self) -> Response {
        if self.format.is_json() {
            return self.error.into_response();
        }
        let status = self.error.status();
        (status, Html(views::error_page(&self.error.to_string()))).into_response()
    }
}
