//! Document actions: create, partial update, list, and fetch with pages.

use tracing::info;
use validator::Validate;

use super::{found, owned_document};
use crate::domain::{AuthContext, Document, DocumentFields, DocumentWithPages};
use crate::error::ActionResult;
use crate::inputs::{
    CreateDocumentInput, GetDocumentWithPagesInput, ListDocumentsInput, UpdateDocumentInput,
};
use crate::ports::DatabaseService;

pub async fn create_document(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: CreateDocumentInput,
) -> ActionResult<Document> {
    input.validate()?;

    let fields = DocumentFields {
        title: input.title,
        description: input.description,
        subject: input.subject,
        grade_level: input.grade_level,
        board: input.board,
        source_type: input.source_type.unwrap_or_default(),
        source_meta: input.source_meta,
    };
    let doc = db.create_document(&auth.user_id, fields).await?;
    info!(document_id = doc.id, user_id = %auth.user_id, "document created");
    Ok(doc)
}

/// Patches an owned document. Omitted fields keep their stored value; an
/// input naming no fields returns the stored row without writing.
pub async fn update_document(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: UpdateDocumentInput,
) -> ActionResult<Document> {
    input.validate()?;

    let existing = owned_document(db, auth, input.id).await?;
    if input.is_empty() {
        return Ok(existing);
    }

    let mut fields = DocumentFields::from(&existing);
    if let Some(title) = input.title {
        fields.title = title;
    }
    if let Some(description) = input.description {
        fields.description = Some(description);
    }
    if let Some(subject) = input.subject {
        fields.subject = Some(subject);
    }
    if let Some(grade_level) = input.grade_level {
        fields.grade_level = Some(grade_level);
    }
    if let Some(board) = input.board {
        fields.board = Some(board);
    }
    if let Some(source_type) = input.source_type {
        fields.source_type = source_type;
    }
    if let Some(source_meta) = input.source_meta {
        fields.source_meta = Some(source_meta);
    }

    let doc = found(db.update_document(existing.id, fields).await?)?;
    info!(document_id = doc.id, "document updated");
    Ok(doc)
}

pub async fn list_documents(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    _input: ListDocumentsInput,
) -> ActionResult<Vec<Document>> {
    Ok(db.list_documents_by_owner(&auth.user_id).await?)
}

pub async fn get_document_with_pages(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: GetDocumentWithPagesInput,
) -> ActionResult<DocumentWithPages> {
    let document = owned_document(db, auth, input.id).await?;
    let pages = db.list_pages_for_document(document.id).await?;
    Ok(DocumentWithPages { document, pages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::save_page;
    use crate::actions::test_support::*;
    use crate::domain::SourceType;
    use crate::inputs::SavePageInput;
    use serde_json::json;

    #[tokio::test]
    async fn create_defaults_source_type_to_image_set() {
        let db = store();
        let doc = create_document(&db, &alice(), titled("Chapter 2"))
            .await
            .unwrap();

        assert_eq!(doc.title, "Chapter 2");
        assert_eq!(doc.owner_id, "alice");
        assert_eq!(doc.source_type, SourceType::ImageSet);
        assert!(doc.id > 0);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let db = store();
        let err = create_document(&db, &alice(), titled("")).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
        assert!(list_documents(&db, &alice(), ListDocumentsInput {})
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_owner() {
        let db = store();
        let mine = create_document(&db, &alice(), titled("Mine")).await.unwrap();
        let theirs = create_document(&db, &bob(), titled("Theirs")).await.unwrap();

        let listed = list_documents(&db, &alice(), ListDocumentsInput {})
            .await
            .unwrap();
        assert_eq!(listed, vec![mine]);

        let listed = list_documents(&db, &bob(), ListDocumentsInput {})
            .await
            .unwrap();
        assert_eq!(listed, vec![theirs]);
    }

    #[tokio::test]
    async fn update_with_only_id_returns_record_unchanged() {
        let db = store();
        let doc = create_document(&db, &alice(), titled("Algebra")).await.unwrap();

        let same = update_document(
            &db,
            &alice(),
            UpdateDocumentInput {
                id: doc.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(same, doc);
        assert_eq!(same.updated_at, doc.updated_at);
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let db = store();
        let doc = create_document(
            &db,
            &alice(),
            CreateDocumentInput {
                title: "Biology".to_string(),
                subject: Some("Science".to_string()),
                source_meta: Some(json!({ "pages": 12 })),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = update_document(
            &db,
            &alice(),
            UpdateDocumentInput {
                id: doc.id,
                board: Some("ICSE".to_string()),
                source_type: Some(SourceType::Pdf),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Biology");
        assert_eq!(updated.subject.as_deref(), Some("Science"));
        assert_eq!(updated.board.as_deref(), Some("ICSE"));
        assert_eq!(updated.source_type, SourceType::Pdf);
        assert_eq!(updated.source_meta, Some(json!({ "pages": 12 })));
        assert!(updated.updated_at >= doc.updated_at);
    }

    #[tokio::test]
    async fn update_of_foreign_document_is_not_found() {
        let db = store();
        let doc = create_document(&db, &alice(), titled("Private")).await.unwrap();

        let err = update_document(
            &db,
            &bob(),
            UpdateDocumentInput {
                id: doc.id,
                title: Some("Stolen".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let untouched = get_document_with_pages(
            &db,
            &alice(),
            GetDocumentWithPagesInput { id: doc.id },
        )
        .await
        .unwrap();
        assert_eq!(untouched.document.title, "Private");
    }

    #[tokio::test]
    async fn get_with_pages_returns_only_that_documents_pages() {
        let db = store();
        let first = create_document(&db, &alice(), titled("One")).await.unwrap();
        let second = create_document(&db, &alice(), titled("Two")).await.unwrap();
        for document_id in [first.id, first.id, second.id] {
            save_page(
                &db,
                &alice(),
                SavePageInput {
                    document_id,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let loaded = get_document_with_pages(
            &db,
            &alice(),
            GetDocumentWithPagesInput { id: first.id },
        )
        .await
        .unwrap();
        assert_eq!(loaded.document, first);
        assert_eq!(loaded.pages.len(), 2);
        assert!(loaded.pages.iter().all(|p| p.document_id == first.id));

        let err = get_document_with_pages(
            &db,
            &bob(),
            GetDocumentWithPagesInput { id: first.id },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
