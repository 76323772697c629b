//! crates/textbook_scan_core/src/actions/mod.rs
//!
//! The action layer: one entry point per use case. Each action validates its
//! input and checks that the acting user owns the target document before it
//! touches the store.

pub mod documents;
pub mod highlights;
pub mod pages;
pub mod scan_jobs;

pub use documents::{create_document, get_document_with_pages, list_documents, update_document};
pub use highlights::{delete_highlight, save_highlight};
pub use pages::{delete_page, save_page};
pub use scan_jobs::{create_scan_job, list_scan_jobs};

use tracing::warn;

use crate::domain::{AuthContext, Document, Highlight, Page};
use crate::error::{ActionError, ActionResult};
use crate::ports::DatabaseService;

//=========================================================================================
// Ownership Guard
//=========================================================================================

/// A row that can be the target of a not-found error.
pub trait Entity {
    const NAME: &'static str;
}

/// A row that only exists inside one document.
pub trait DocumentScoped: Entity {
    fn document_id(&self) -> i64;
}

impl Entity for Document {
    const NAME: &'static str = "Document";
}

impl Entity for Page {
    const NAME: &'static str = "Page";
}

impl Entity for Highlight {
    const NAME: &'static str = "Highlight";
}

impl DocumentScoped for Page {
    fn document_id(&self) -> i64 {
        self.document_id
    }
}

impl DocumentScoped for Highlight {
    fn document_id(&self) -> i64 {
        self.document_id
    }
}

/// Turns a missing row into the entity's `NOT_FOUND` error.
pub(crate) fn found<T: Entity>(row: Option<T>) -> ActionResult<T> {
    row.ok_or_else(|| {
        warn!(entity = T::NAME, "row missing or not visible to caller");
        ActionError::not_found(T::NAME)
    })
}

/// Like [`found`], but a row attached to another document counts as missing.
pub(crate) fn found_in<T: DocumentScoped>(row: Option<T>, document_id: i64) -> ActionResult<T> {
    found(row.filter(|r| r.document_id() == document_id))
}

/// Loads a document only if the acting user owns it.
pub(crate) async fn owned_document(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    id: i64,
) -> ActionResult<Document> {
    found(db.find_owned_document(id, &auth.user_id).await?)
}
