//! crates/textbook_scan_core/src/ports.rs
//!
//! Defines the persistence contract the action layer is written against.
//! The trait forms the boundary of the hexagonal architecture: the actions
//! never see SQL, only typed lookups and writes over the four tables.

use async_trait::async_trait;

use crate::domain::{
    Document, DocumentFields, Highlight, HighlightFields, NewScanJob, Page, PageFields, ScanJob,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A failure of the underlying store. Missing rows are not errors: lookups
/// and targeted writes report them as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Persistence Gateway
//=========================================================================================

/// Row access over documents, pages, highlights and scan jobs.
///
/// Lookups return `Ok(None)` for a missing row; `PortError` is reserved for
/// failures of the store itself. Writes that target an existing row return
/// `Ok(None)` when no row matched.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Documents ---
    async fn create_document(&self, owner_id: &str, fields: DocumentFields)
        -> PortResult<Document>;

    /// Loads a document only if it is owned by `owner_id`.
    async fn find_owned_document(&self, id: i64, owner_id: &str) -> PortResult<Option<Document>>;

    async fn list_documents_by_owner(&self, owner_id: &str) -> PortResult<Vec<Document>>;

    /// Writes every column in `fields` and refreshes `updated_at`.
    async fn update_document(&self, id: i64, fields: DocumentFields)
        -> PortResult<Option<Document>>;

    // --- Pages ---
    async fn get_page(&self, id: i64) -> PortResult<Option<Page>>;

    async fn list_pages_for_document(&self, document_id: i64) -> PortResult<Vec<Page>>;

    async fn create_page(&self, document_id: i64, fields: PageFields) -> PortResult<Page>;

    /// Overwrites every writable column and refreshes `updated_at`.
    async fn replace_page(&self, id: i64, fields: PageFields) -> PortResult<Option<Page>>;

    /// Deletes the page matching both `id` and `document_id`, returning it.
    async fn delete_page(&self, id: i64, document_id: i64) -> PortResult<Option<Page>>;

    // --- Highlights ---
    async fn get_highlight(&self, id: i64) -> PortResult<Option<Highlight>>;

    async fn create_highlight(
        &self,
        document_id: i64,
        fields: HighlightFields,
    ) -> PortResult<Highlight>;

    async fn replace_highlight(
        &self,
        id: i64,
        fields: HighlightFields,
    ) -> PortResult<Option<Highlight>>;

    async fn delete_highlight(&self, id: i64, document_id: i64) -> PortResult<Option<Highlight>>;

    // --- Scan Jobs ---
    async fn create_scan_job(&self, job: NewScanJob) -> PortResult<ScanJob>;

    async fn list_scan_jobs_by_user(&self, user_id: &str) -> PortResult<Vec<ScanJob>>;
}
