pub mod extract;
pub mod health;
pub mod middleware;
pub mod rpc;
pub mod state;

pub use middleware::require_auth;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use rpc::*;
use state::AppState;

/// Builds the complete application: operations, health check and Swagger UI.
pub fn router(state: Arc<AppState>) -> Result<Router, ApiError> {
    let config = state.config.clone();

    let origin = config.cors_allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid CORS origin '{}': {}",
            config.cors_allowed_origin, e
        ))
    })?;
    let user_header = HeaderName::from_bytes(config.user_id_header.as_bytes()).map_err(|e| {
        ApiError::Internal(format!(
            "Invalid user id header '{}': {}",
            config.user_id_header, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, user_header]);

    // Public routes (no session user required)
    let public_routes = Router::new().route("/health", get(health::health_handler));

    // Protected routes (session user required)
    let protected_routes = Router::new()
        .route("/rpc/createDocument", post(create_document_handler))
        .route("/rpc/updateDocument", post(update_document_handler))
        .route("/rpc/listDocuments", post(list_documents_handler))
        .route("/rpc/getDocumentWithPages", post(get_document_with_pages_handler))
        .route("/rpc/savePage", post(save_page_handler))
        .route("/rpc/deletePage", post(delete_page_handler))
        .route("/rpc/saveHighlight", post(save_highlight_handler))
        .route("/rpc/deleteHighlight", post(delete_highlight_handler))
        .route("/rpc/createScanJob", post(create_scan_job_handler))
        .route("/rpc/listScanJobs", post(list_scan_jobs_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Merge the API router with the Swagger UI router for a complete application.
    Ok(Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())))
}
