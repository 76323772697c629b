//! services/api/src/web/extract.rs
//!
//! The JSON body extractor used by every operation.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use textbook_scan_core::ActionError;

use crate::error::ApiError;

/// Like `axum::Json`, but a body that does not parse into `T` is reported as
/// a `VALIDATION` error instead of axum's plain-text rejection.
///
/// An empty body is read as `{}`, so operations whose inputs have no required
/// fields (`listDocuments`, `listScanJobs`) can be called without one.
pub struct ActionInput<T>(pub T);

impl<S, T> FromRequest<S> for ActionInput<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ActionError::Validation(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            let value = serde_json::from_str::<T>("{}")
                .map_err(|e| ActionError::Validation(format!("Missing request body: {e}")))?;
            return Ok(Self(value));
        }
        if !is_json {
            return Err(ActionError::Validation(
                "Expected request with `Content-Type: application/json`".to_string(),
            )
            .into());
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|rejection| ActionError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}
