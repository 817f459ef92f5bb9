use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::{internal_error, ApiError};
use crate::security::authenticator::AuthenticatedPrincipal;
use crate::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Request gate for the translations API.
///
/// Every request to a protected route re-authenticates; the resolved
/// principal lives in the request extensions and is dropped with the request.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let Some(api_key) = api_key else {
        return unauthorized("API key is required");
    };

    match state.authenticator.authenticate(api_key) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(_) => {
            tracing::warn!(
                path = request.uri().path(),
                "Rejected request with unrecognized API key"
            );
            unauthorized("Invalid API key")
        }
    }
}

fn unauthorized(message: &str) -> Response {
    let body = json!({
        "success": false,
        "message": message,
        "timestamp": chrono::Utc::now().timestamp_millis(),
    });
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// Extractor handing the authenticated principal to handlers.
///
/// Only valid behind [`require_api_key`]; a missing principal means a route
/// was wired outside the gate, which is a programming error rather than a
/// client-facing one.
pub struct CurrentTenant(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(CurrentTenant)
            .ok_or_else(|| {
                tracing::error!(
                    path = parts.uri.path(),
                    "CurrentTenant used on a route outside the API-key gate"
                );
                internal_error("authenticated principal missing from request context")
            })
    }
}
