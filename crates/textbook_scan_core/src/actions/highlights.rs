//! Highlight actions. Same upsert-by-id, full-replace shape as pages.

use tracing::info;
use validator::Validate;

use super::{found, found_in, owned_document};
use crate::domain::{AuthContext, Highlight, HighlightFields};
use crate::error::ActionResult;
use crate::inputs::{DeleteHighlightInput, SaveHighlightInput};
use crate::ports::DatabaseService;

pub async fn save_highlight(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: SaveHighlightInput,
) -> ActionResult<Highlight> {
    input.validate()?;

    let document = owned_document(db, auth, input.document_id).await?;
    if let Some(page_id) = input.page_id {
        found_in(db.get_page(page_id).await?, document.id)?;
    }

    let fields = HighlightFields {
        page_id: input.page_id,
        highlight_type: input.highlight_type.unwrap_or_default(),
        content: input.content,
        meta: input.meta,
    };

    match input.id {
        Some(id) => {
            let existing = found_in(db.get_highlight(id).await?, document.id)?;
            let highlight = found(db.replace_highlight(existing.id, fields).await?)?;
            info!(highlight_id = highlight.id, document_id = document.id, "highlight replaced");
            Ok(highlight)
        }
        None => {
            let highlight = db.create_highlight(document.id, fields).await?;
            info!(highlight_id = highlight.id, document_id = document.id, "highlight created");
            Ok(highlight)
        }
    }
}

pub async fn delete_highlight(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: DeleteHighlightInput,
) -> ActionResult<Highlight> {
    let document = owned_document(db, auth, input.document_id).await?;
    let highlight = found(db.delete_highlight(input.id, document.id).await?)?;
    info!(highlight_id = highlight.id, document_id = document.id, "highlight deleted");
    Ok(highlight)
}
