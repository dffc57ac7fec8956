// src/server/handlers.rs
// =============================================================================
// HTTP handlers and the small middleware around them.
//
// - GET     /api/readme?owner=..&repo=..  -> Document JSON
// - OPTIONS /api/readme                   -> 200, empty body (CORS preflight)
//
// Errors:
// - malformed query    -> 400 with the parser's message
// - missing owner/repo -> 400 with a message saying which one
// - anything else      -> 500 with a generic message; details are logged
// =============================================================================

use std::time::Instant;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::AppState;
use crate::document::build_document;

#[derive(Debug, Deserialize)]
pub struct ReadmeQuery {
    pub owner: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// The query string could not be parsed (e.g. a repeated parameter)
    InvalidQuery(String),
    /// A required query parameter was missing or empty
    MissingParam(&'static str),
    /// Some collaborator failed; the detail has already been logged
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidQuery(reason) => (
                StatusCode::BAD_REQUEST,
                format!("invalid query string: {reason}"),
            ),
            Self::MissingParam(name) => (
                StatusCode::BAD_REQUEST,
                format!("missing required query parameter: {name}"),
            ),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to build README document".to_string(),
            ),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParam(name))
}

pub async fn get_readme(
    State(state): State<AppState>,
    query: Result<Query<ReadmeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let owner = required(query.owner, "owner")?;
    let repo = required(query.repo, "repo")?;

    info!(%owner, %repo, "building README document");

    match build_document(state.host.as_ref(), &owner, &repo, state.request_timeout).await {
        Ok(document) => Ok(Json(document).into_response()),
        Err(err) => {
            error!(%owner, %repo, error = %format!("{err:#}"), "README request failed");
            Err(ApiError::Internal)
        }
    }
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

// Adds the cross-origin headers to every response
pub async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

// Logs every 4xx/5xx response with timing
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            %method,
            path = %uri,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request failed"
        );
    }

    response
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Result<Query<..>, QueryRejection> as an extractor?
//    - A plain Query<..> answers bad query strings with axum's own plain text
//    - Taking the Result lets us answer with our JSON error body instead
//
// 2. What is IntoResponse?
//    - A trait for "can be turned into an HTTP response"
//    - Returning Err(ApiError) from a handler uses ApiError's impl
//
// 3. What is map_response?
//    - Middleware that only sees the outgoing response
//    - Good for adding the same headers to everything
// -----------------------------------------------------------------------------
