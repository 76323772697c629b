//! services/api/src/web/middleware.rs
//!
//! Resolves the acting user for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use textbook_scan_core::{ActionError, AuthContext};
use tracing::warn;

use crate::error::ApiError;
use crate::web::state::AppState;

/// Middleware that reads the user id set by the upstream session layer.
///
/// If present, inserts an `AuthContext` into request extensions for handlers to use.
/// If missing or blank, the request fails with `UNAUTHORIZED`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = state.config.user_id_header.as_str();
    let user_id = req.headers().get(header).and_then(|v| v.to_str().ok());

    let auth = AuthContext::from_session(user_id).ok_or_else(|| {
        warn!(path = %req.uri().path(), "request without a session user");
        ActionError::Unauthorized("Unauthorized".to_string())
    })?;

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}
