//! crates/textbook_scan_core/src/inputs.rs
//!
//! One structured input object per action. Field names are camelCase on the
//! wire; `validator` rules cover the checks serde's typing cannot express.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{HighlightType, JobStatus, JobType, SourceType};

//=========================================================================================
// Documents
//=========================================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub board: Option<String>,
    pub source_type: Option<SourceType>,
    #[schema(value_type = Option<Object>)]
    pub source_meta: Option<Value>,
}

/// A partial document update: only fields that are present are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentInput {
    pub id: i64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub board: Option<String>,
    pub source_type: Option<SourceType>,
    #[schema(value_type = Option<Object>)]
    pub source_meta: Option<Value>,
}

impl UpdateDocumentInput {
    /// True when the input names no field besides `id`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.subject.is_none()
            && self.grade_level.is_none()
            && self.board.is_none()
            && self.source_type.is_none()
            && self.source_meta.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct ListDocumentsInput {}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct GetDocumentWithPagesInput {
    pub id: i64,
}

//=========================================================================================
// Pages
//=========================================================================================

/// Inserts a page, or fully replaces the page named by `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SavePageInput {
    pub id: Option<i64>,
    pub document_id: i64,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page_number: Option<i32>,
    pub image_url: Option<String>,
    pub ocr_text: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub ocr_blocks: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeletePageInput {
    pub id: i64,
    pub document_id: i64,
}

//=========================================================================================
// Highlights
//=========================================================================================

/// Inserts a highlight, or fully replaces the highlight named by `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveHighlightInput {
    pub id: Option<i64>,
    pub document_id: i64,
    pub page_id: Option<i64>,
    pub highlight_type: Option<HighlightType>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHighlightInput {
    pub id: i64,
    pub document_id: i64,
}

//=========================================================================================
// Scan Jobs
//=========================================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScanJobInput {
    pub document_id: Option<i64>,
    pub page_id: Option<i64>,
    pub job_type: Option<JobType>,
    #[schema(value_type = Option<Object>)]
    pub input: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub output: Option<Value>,
    pub status: Option<JobStatus>,
}

/// Optional exact-match filters over the caller's scan jobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListScanJobsInput {
    pub document_id: Option<i64>,
    pub page_id: Option<i64>,
    pub status: Option<JobStatus>,
}
