//! Page actions. Saving a page is an upsert by id with full-replace semantics.

use tracing::info;
use validator::Validate;

use super::{found, found_in, owned_document};
use crate::domain::{AuthContext, Page, PageFields};
use crate::error::ActionResult;
use crate::inputs::{DeletePageInput, SavePageInput};
use crate::ports::DatabaseService;

/// Inserts a page into an owned document, or overwrites every writable field
/// of the page named by `id`. An `id` belonging to another document is
/// reported as a missing page.
pub async fn save_page(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: SavePageInput,
) -> ActionResult<Page> {
    input.validate()?;

    let document = owned_document(db, auth, input.document_id).await?;
    let fields = PageFields {
        page_number: input.page_number.unwrap_or(1),
        image_url: input.image_url,
        ocr_text: input.ocr_text,
        ocr_blocks: input.ocr_blocks,
    };

    match input.id {
        Some(id) => {
            let existing = found_in(db.get_page(id).await?, document.id)?;
            let page = found(db.replace_page(existing.id, fields).await?)?;
            info!(page_id = page.id, document_id = document.id, "page replaced");
            Ok(page)
        }
        None => {
            let page = db.create_page(document.id, fields).await?;
            info!(page_id = page.id, document_id = document.id, "page created");
            Ok(page)
        }
    }
}

pub async fn delete_page(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: DeletePageInput,
) -> ActionResult<Page> {
    let document = owned_document(db, auth, input.document_id).await?;
    let page = found(db.delete_page(input.id, document.id).await?)?;
    info!(page_id = page.id, document_id = document.id, "page deleted");
    Ok(page)
}
