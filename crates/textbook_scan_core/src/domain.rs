//! crates/textbook_scan_core/src/domain.rs
//!
//! Defines the core data structures for the application: the four persisted
//! records, their enumerated columns, and the acting-user context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

//=========================================================================================
// Enumerated Columns
//=========================================================================================

/// Returned when a stored enum column holds a value this build does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `as_str`, `Display` and `FromStr` for a snake_case enum column.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// How the scanned material was supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Pdf,
    #[default]
    ImageSet,
    Other,
}
text_enum!(SourceType, "source type", {
    Pdf => "pdf",
    ImageSet => "image_set",
    Other => "other",
});

/// The kind of fragment a highlight captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighlightType {
    #[default]
    KeyPoint,
    Question,
    Definition,
    Formula,
    Other,
}
text_enum!(HighlightType, "highlight type", {
    KeyPoint => "key_point",
    Question => "question",
    Definition => "definition",
    Formula => "formula",
    Other => "other",
});

/// Which external pipeline a scan job asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Ocr,
    HighlightExtraction,
    #[default]
    FullPipeline,
    Other,
}
text_enum!(JobType, "job type", {
    Ocr => "ocr",
    HighlightExtraction => "highlight_extraction",
    FullPipeline => "full_pipeline",
    Other => "other",
});

/// Reported outcome of a scan job. Set once, at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}
text_enum!(JobStatus, "job status", {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
});

//=========================================================================================
// Records
//=========================================================================================

/// A scanned textbook or chapter owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub board: Option<String>,
    pub source_type: SourceType,
    #[schema(value_type = Option<Object>)]
    pub source_meta: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One scanned page of a document, carrying whatever OCR output was reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: i64,
    pub document_id: i64,
    pub page_number: i32,
    pub image_url: Option<String>,
    pub ocr_text: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub ocr_blocks: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: i64,
    pub document_id: i64,
    pub page_id: Option<i64>,
    pub highlight_type: HighlightType,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// A recorded OCR/extraction request. Payloads are opaque to this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanJob {
    pub id: i64,
    pub document_id: Option<i64>,
    pub page_id: Option<i64>,
    pub user_id: String,
    pub job_type: JobType,
    #[schema(value_type = Option<Object>)]
    pub input: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub output: Option<Value>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// The result of `getDocumentWithPages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentWithPages {
    pub document: Document,
    pub pages: Vec<Page>,
}

//=========================================================================================
// Values handed to the persistence gateway
//=========================================================================================

/// Writable columns of a document. Used for inserts and for whole-row updates.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFields {
    pub title: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub board: Option<String>,
    pub source_type: SourceType,
    pub source_meta: Option<Value>,
}

impl From<&Document> for DocumentFields {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            description: doc.description.clone(),
            subject: doc.subject.clone(),
            grade_level: doc.grade_level.clone(),
            board: doc.board.clone(),
            source_type: doc.source_type,
            source_meta: doc.source_meta.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageFields {
    pub page_number: i32,
    pub image_url: Option<String>,
    pub ocr_text: Option<String>,
    pub ocr_blocks: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightFields {
    pub page_id: Option<i64>,
    pub highlight_type: HighlightType,
    pub content: String,
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewScanJob {
    pub document_id: Option<i64>,
    pub page_id: Option<i64>,
    pub user_id: String,
    pub job_type: JobType,
    pub input: Option<Value>,
    pub output: Option<Value>,
    pub status: JobStatus,
}

//=========================================================================================
// Acting User
//=========================================================================================

/// The identity resolved from the caller's session by the external auth layer.
///
/// Every action takes one of these explicitly; there is no ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
}

impl AuthContext {
    /// Builds a context from whatever identity the session layer supplied.
    /// Returns `None` when there is no usable user id.
    pub fn from_session(user_id: Option<&str>) -> Option<Self> {
        user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Self {
                user_id: id.to_string(),
            })
    }
}
