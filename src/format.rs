use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};

/// Output format for a request, decided once at the boundary. Handlers
/// receive the decision and never re-inspect headers themselves.
///
/// JSON is selected by a `format=json` query parameter or an
/// `application/json` Content-Type / Accept header; everything else is HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

impl ResponseFormat {
    pub fn is_json(self) -> bool {
        self == Self::Json
    }

    pub fn detect(uri: &Uri, headers: &HeaderMap) -> Self {
        if query_wants_json(uri.query())
            || header_is_json(headers, CONTENT_TYPE)
            || header_is_json(headers, ACCEPT)
        {
            Self::Json
        } else {
            Self::Html
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::detect(&parts.uri, &parts.headers)
    }
}

fn query_wants_json(query: Option<&str>) -> bool {
    query
        .map(|q| q.split('&').any(|pair| pair == "format=json"))
        .unwrap_or(false)
}

fn header_is_json(headers: &HeaderMap, name: HeaderName) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
