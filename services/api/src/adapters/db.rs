//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use textbook_scan_core::domain::{
    Document, DocumentFields, Highlight, HighlightFields, NewScanJob, Page, PageFields, ScanJob,
    UnknownVariant,
};
use textbook_scan_core::ports::{DatabaseService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the schema in `./migrations` at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn bad_column(e: UnknownVariant) -> PortError {
    PortError::Unexpected(format!("corrupt row: {e}"))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

const DOCUMENT_COLUMNS: &str = "id, owner_id, title, description, subject, grade_level, board, \
     source_type, source_meta, created_at, updated_at";
const PAGE_COLUMNS: &str =
    "id, document_id, page_number, image_url, ocr_text, ocr_blocks, created_at, updated_at";
const HIGHLIGHT_COLUMNS: &str =
    "id, document_id, page_id, highlight_type, content, meta, created_at";
const SCAN_JOB_COLUMNS: &str =
    "id, document_id, page_id, user_id, job_type, input, output, status, created_at";

#[derive(FromRow)]
struct DocumentRecord {
    id: i64,
    owner_id: String,
    title: String,
    description: Option<String>,
    subject: Option<String>,
    grade_level: Option<String>,
    board: Option<String>,
    source_type: String,
    source_meta: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl DocumentRecord {
    fn to_domain(self) -> PortResult<Document> {
        Ok(Document {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            subject: self.subject,
            grade_level: self.grade_level,
            board: self.board,
            source_type: self.source_type.parse().map_err(bad_column)?,
            source_meta: self.source_meta,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct PageRecord {
    id: i64,
    document_id: i64,
    page_number: i32,
    image_url: Option<String>,
    ocr_text: Option<String>,
    ocr_blocks: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl PageRecord {
    fn to_domain(self) -> Page {
        Page {
            id: self.id,
            document_id: self.document_id,
            page_number: self.page_number,
            image_url: self.image_url,
            ocr_text: self.ocr_text,
            ocr_blocks: self.ocr_blocks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct HighlightRecord {
    id: i64,
    document_id: i64,
    page_id: Option<i64>,
    highlight_type: String,
    content: String,
    meta: Option<Value>,
    created_at: DateTime<Utc>,
}
impl HighlightRecord {
    fn to_domain(self) -> PortResult<Highlight> {
        Ok(Highlight {
            id: self.id,
            document_id: self.document_id,
            page_id: self.page_id,
            highlight_type: self.highlight_type.parse().map_err(bad_column)?,
            content: self.content,
            meta: self.meta,
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct ScanJobRecord {
    id: i64,
    document_id: Option<i64>,
    page_id: Option<i64>,
    user_id: String,
    job_type: String,
    input: Option<Value>,
    output: Option<Value>,
    status: String,
    created_at: DateTime<Utc>,
}
impl ScanJobRecord {
    fn to_domain(self) -> PortResult<ScanJob> {
        Ok(ScanJob {
            id: self.id,
            document_id: self.document_id,
            page_id: self.page_id,
            user_id: self.user_id,
            job_type: self.job_type.parse().map_err(bad_column)?,
            input: self.input,
            output: self.output,
            status: self.status.parse().map_err(bad_column)?,
            created_at: self.created_at,
        })
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    // --- Documents ---

    async fn create_document(
        &self,
        owner_id: &str,
        fields: DocumentFields,
    ) -> PortResult<Document> {
        let sql = format!(
            "INSERT INTO documents (owner_id, title, description, subject, grade_level, board, source_type, source_meta) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {DOCUMENT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(owner_id)
            .bind(fields.title)
            .bind(fields.description)
            .bind(fields.subject)
            .bind(fields.grade_level)
            .bind(fields.board)
            .bind(fields.source_type.as_str())
            .bind(fields.source_meta)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        record.to_domain()
    }

    async fn find_owned_document(&self, id: i64, owner_id: &str) -> PortResult<Option<Document>> {
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(DocumentRecord::to_domain)
            .transpose()
    }

    async fn list_documents_by_owner(&self, owner_id: &str) -> PortResult<Vec<Document>> {
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE owner_id = $1 ORDER BY id ASC");
        let records = sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        records.into_iter().map(DocumentRecord::to_domain).collect()
    }

    async fn update_document(
        &self,
        id: i64,
        fields: DocumentFields,
    ) -> PortResult<Option<Document>> {
        let sql = format!(
            "UPDATE documents SET title = $1, description = $2, subject = $3, grade_level = $4, \
             board = $5, source_type = $6, source_meta = $7, updated_at = now() \
             WHERE id = $8 RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(fields.title)
            .bind(fields.description)
            .bind(fields.subject)
            .bind(fields.grade_level)
            .bind(fields.board)
            .bind(fields.source_type.as_str())
            .bind(fields.source_meta)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(DocumentRecord::to_domain)
            .transpose()
    }

    // --- Pages ---

    async fn get_page(&self, id: i64) -> PortResult<Option<Page>> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1");
        let record = sqlx::query_as::<_, PageRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.map(PageRecord::to_domain))
    }

    async fn list_pages_for_document(&self, document_id: i64) -> PortResult<Vec<Page>> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE document_id = $1 ORDER BY id ASC");
        let records = sqlx::query_as::<_, PageRecord>(&sql)
            .bind(document_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(PageRecord::to_domain).collect())
    }

    async fn create_page(&self, document_id: i64, fields: PageFields) -> PortResult<Page> {
        let sql = format!(
            "INSERT INTO pages (document_id, page_number, image_url, ocr_text, ocr_blocks) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PAGE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PageRecord>(&sql)
            .bind(document_id)
            .bind(fields.page_number)
            .bind(fields.image_url)
            .bind(fields.ocr_text)
            .bind(fields.ocr_blocks)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn replace_page(&self, id: i64, fields: PageFields) -> PortResult<Option<Page>> {
        let sql = format!(
            "UPDATE pages SET page_number = $1, image_url = $2, ocr_text = $3, ocr_blocks = $4, \
             updated_at = now() WHERE id = $5 RETURNING {PAGE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PageRecord>(&sql)
            .bind(fields.page_number)
            .bind(fields.image_url)
            .bind(fields.ocr_text)
            .bind(fields.ocr_blocks)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.map(PageRecord::to_domain))
    }

    async fn delete_page(&self, id: i64, document_id: i64) -> PortResult<Option<Page>> {
        let sql = format!(
            "DELETE FROM pages WHERE id = $1 AND document_id = $2 RETURNING {PAGE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PageRecord>(&sql)
            .bind(id)
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.map(PageRecord::to_domain))
    }

    // --- Highlights ---

    async fn get_highlight(&self, id: i64) -> PortResult<Option<Highlight>> {
        let sql = format!("SELECT {HIGHLIGHT_COLUMNS} FROM highlights WHERE id = $1");
        sqlx::query_as::<_, HighlightRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(HighlightRecord::to_domain)
            .transpose()
    }

    async fn create_highlight(
        &self,
        document_id: i64,
        fields: HighlightFields,
    ) -> PortResult<Highlight> {
        let sql = format!(
            "INSERT INTO highlights (document_id, page_id, highlight_type, content, meta) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {HIGHLIGHT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, HighlightRecord>(&sql)
            .bind(document_id)
            .bind(fields.page_id)
            .bind(fields.highlight_type.as_str())
            .bind(fields.content)
            .bind(fields.meta)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        record.to_domain()
    }

    async fn replace_highlight(
        &self,
        id: i64,
        fields: HighlightFields,
    ) -> PortResult<Option<Highlight>> {
        let sql = format!(
            "UPDATE highlights SET page_id = $1, highlight_type = $2, content = $3, meta = $4 \
             WHERE id = $5 RETURNING {HIGHLIGHT_COLUMNS}"
        );
        sqlx::query_as::<_, HighlightRecord>(&sql)
            .bind(fields.page_id)
            .bind(fields.highlight_type.as_str())
            .bind(fields.content)
            .bind(fields.meta)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(HighlightRecord::to_domain)
            .transpose()
    }

    async fn delete_highlight(&self, id: i64, document_id: i64) -> PortResult<Option<Highlight>> {
        let sql = format!(
            "DELETE FROM highlights WHERE id = $1 AND document_id = $2 RETURNING {HIGHLIGHT_COLUMNS}"
        );
        sqlx::query_as::<_, HighlightRecord>(&sql)
            .bind(id)
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(HighlightRecord::to_domain)
            .transpose()
    }

    // --- Scan Jobs ---

    async fn create_scan_job(&self, job: NewScanJob) -> PortResult<ScanJob> {
        let sql = format!(
            "INSERT INTO scan_jobs (document_id, page_id, user_id, job_type, input, output, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {SCAN_JOB_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ScanJobRecord>(&sql)
            .bind(job.document_id)
            .bind(job.page_id)
            .bind(job.user_id)
            .bind(job.job_type.as_str())
            .bind(job.input)
            .bind(job.output)
            .bind(job.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        record.to_domain()
    }

    async fn list_scan_jobs_by_user(&self, user_id: &str) -> PortResult<Vec<ScanJob>> {
        let sql = format!("SELECT {SCAN_JOB_COLUMNS} FROM scan_jobs WHERE user_id = $1 ORDER BY id ASC");
        let records = sqlx::query_as::<_, ScanJobRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        records.into_iter().map(ScanJobRecord::to_domain).collect()
    }
}
