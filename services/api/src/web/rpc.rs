//! services/api/src/web/rpc.rs
//!
//! Contains the Axum handlers for the named operations and the master
//! definition for the OpenAPI specification.
//!
//! Every operation is `POST /rpc/<operationName>` with a single JSON input
//! object. The acting user has already been resolved by `require_auth`.

use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use textbook_scan_core::actions;
use textbook_scan_core::domain::{
    AuthContext, Document, DocumentWithPages, Highlight, HighlightType, JobStatus, JobType, Page,
    ScanJob, SourceType,
};
use textbook_scan_core::inputs::{
    CreateDocumentInput, CreateScanJobInput, DeleteHighlightInput, DeletePageInput,
    GetDocumentWithPagesInput, ListDocumentsInput, ListScanJobsInput, SaveHighlightInput,
    SavePageInput, UpdateDocumentInput,
};
use utoipa::OpenApi;

use crate::error::{ApiError, ErrorBody};
use crate::web::extract::ActionInput;
use crate::web::health::{self, HealthResponse};
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_handler,
        create_document_handler,
        update_document_handler,
        list_documents_handler,
        get_document_with_pages_handler,
        save_page_handler,
        delete_page_handler,
        save_highlight_handler,
        delete_highlight_handler,
        create_scan_job_handler,
        list_scan_jobs_handler,
    ),
    components(
        schemas(
            Document, DocumentWithPages, Page, Highlight, ScanJob,
            SourceType, HighlightType, JobType, JobStatus,
            CreateDocumentInput, UpdateDocumentInput, ListDocumentsInput, GetDocumentWithPagesInput,
            SavePageInput, DeletePageInput, SaveHighlightInput, DeleteHighlightInput,
            CreateScanJobInput, ListScanJobsInput, ErrorBody, HealthResponse,
        )
    ),
    tags(
        (name = "documents", description = "Scanned textbooks and chapters."),
        (name = "pages", description = "Scanned pages and their OCR output."),
        (name = "highlights", description = "Fragments extracted from a document."),
        (name = "scan_jobs", description = "Recorded OCR and extraction requests.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Documents
//=========================================================================================

/// Create a document owned by the acting user.
#[utoipa::path(
    post,
    path = "/rpc/createDocument",
    tag = "documents",
    request_body = CreateDocumentInput,
    responses(
        (status = 200, description = "Document created", body = Document),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "No session user", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn create_document_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<CreateDocumentInput>,
) -> Result<Json<Document>, ApiError> {
    let doc = actions::create_document(state.db.as_ref(), &auth, input).await?;
    Ok(Json(doc))
}

/// Patch an owned document. Only the supplied fields change.
#[utoipa::path(
    post,
    path = "/rpc/updateDocument",
    tag = "documents",
    request_body = UpdateDocumentInput,
    responses(
        (status = 200, description = "Document after the update", body = Document),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn update_document_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<UpdateDocumentInput>,
) -> Result<Json<Document>, ApiError> {
    let doc = actions::update_document(state.db.as_ref(), &auth, input).await?;
    Ok(Json(doc))
}

/// List every document owned by the acting user.
#[utoipa::path(
    post,
    path = "/rpc/listDocuments",
    tag = "documents",
    request_body = ListDocumentsInput,
    responses(
        (status = 200, description = "The caller's documents", body = [Document]),
        (status = 401, description = "No session user", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn list_documents_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<ListDocumentsInput>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let docs = actions::list_documents(state.db.as_ref(), &auth, input).await?;
    Ok(Json(docs))
}

/// Fetch an owned document together with all of its pages.
#[utoipa::path(
    post,
    path = "/rpc/getDocumentWithPages",
    tag = "documents",
    request_body = GetDocumentWithPagesInput,
    responses(
        (status = 200, description = "The document and its pages", body = DocumentWithPages),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn get_document_with_pages_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<GetDocumentWithPagesInput>,
) -> Result<Json<DocumentWithPages>, ApiError> {
    let loaded = actions::get_document_with_pages(state.db.as_ref(), &auth, input).await?;
    Ok(Json(loaded))
}

//=========================================================================================
// Pages
//=========================================================================================

/// Insert a page, or fully replace the page named by `id`.
#[utoipa::path(
    post,
    path = "/rpc/savePage",
    tag = "pages",
    request_body = SavePageInput,
    responses(
        (status = 200, description = "The stored page", body = Page),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document or page not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn save_page_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<SavePageInput>,
) -> Result<Json<Page>, ApiError> {
    let page = actions::save_page(state.db.as_ref(), &auth, input).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/rpc/deletePage",
    tag = "pages",
    request_body = DeletePageInput,
    responses(
        (status = 200, description = "The deleted page", body = Page),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document or page not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn delete_page_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<DeletePageInput>,
) -> Result<Json<Page>, ApiError> {
    let page = actions::delete_page(state.db.as_ref(), &auth, input).await?;
    Ok(Json(page))
}

//=========================================================================================
// Highlights
//=========================================================================================

/// Insert a highlight, or fully replace the highlight named by `id`.
#[utoipa::path(
    post,
    path = "/rpc/saveHighlight",
    tag = "highlights",
    request_body = SaveHighlightInput,
    responses(
        (status = 200, description = "The stored highlight", body = Highlight),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document, page or highlight not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn save_highlight_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<SaveHighlightInput>,
) -> Result<Json<Highlight>, ApiError> {
    let highlight = actions::save_highlight(state.db.as_ref(), &auth, input).await?;
    Ok(Json(highlight))
}

#[utoipa::path(
    post,
    path = "/rpc/deleteHighlight",
    tag = "highlights",
    request_body = DeleteHighlightInput,
    responses(
        (status = 200, description = "The deleted highlight", body = Highlight),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document or highlight not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn delete_highlight_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<DeleteHighlightInput>,
) -> Result<Json<Highlight>, ApiError> {
    let highlight = actions::delete_highlight(state.db.as_ref(), &auth, input).await?;
    Ok(Json(highlight))
}

//=========================================================================================
// Scan Jobs
//=========================================================================================

/// Record an OCR or extraction request.
#[utoipa::path(
    post,
    path = "/rpc/createScanJob",
    tag = "scan_jobs",
    request_body = CreateScanJobInput,
    responses(
        (status = 200, description = "The recorded job", body = ScanJob),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "No session user", body = ErrorBody),
        (status = 404, description = "Document or page not found", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn create_scan_job_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<CreateScanJobInput>,
) -> Result<Json<ScanJob>, ApiError> {
    let job = actions::create_scan_job(state.db.as_ref(), &auth, input).await?;
    Ok(Json(job))
}

/// List the caller's scan jobs, optionally filtered.
#[utoipa::path(
    post,
    path = "/rpc/listScanJobs",
    tag = "scan_jobs",
    request_body = ListScanJobsInput,
    responses(
        (status = 200, description = "Matching jobs", body = [ScanJob]),
        (status = 401, description = "No session user", body = ErrorBody)
    ),
    params(("x-user-id" = String, Header, description = "The acting user, set by the session layer."))
)]
pub async fn list_scan_jobs_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    ActionInput(input): ActionInput<ListScanJobsInput>,
) -> Result<Json<Vec<ScanJob>>, ApiError> {
    let jobs = actions::list_scan_jobs(state.db.as_ref(), &auth, input).await?;
    Ok(Json(jobs))
}
