//! crates/textbook_scan_core/src/memory.rs
//!
//! An in-process implementation of the `DatabaseService` port. Rows live in
//! insertion order and ids are assigned per table starting at 1, mirroring
//! the BIGSERIAL columns of the Postgres schema.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    Document, DocumentFields, Highlight, HighlightFields, NewScanJob, Page, PageFields, ScanJob,
};
use crate::ports::{DatabaseService, PortResult};

#[derive(Default)]
struct Tables {
    documents: Vec<Document>,
    pages: Vec<Page>,
    highlights: Vec<Highlight>,
    scan_jobs: Vec<ScanJob>,
    last_id: [i64; 4],
}

impl Tables {
    fn next_id(&mut self, table: usize) -> i64 {
        self.last_id[table] += 1;
        self.last_id[table]
    }
}

const DOCUMENTS: usize = 0;
const PAGES: usize = 1;
const HIGHLIGHTS: usize = 2;
const SCAN_JOBS: usize = 3;

#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for InMemoryDatabase {
    async fn create_document(
        &self,
        owner_id: &str,
        fields: DocumentFields,
    ) -> PortResult<Document> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let doc = Document {
            id: tables.next_id(DOCUMENTS),
            owner_id: owner_id.to_string(),
            title: fields.title,
            description: fields.description,
            subject: fields.subject,
            grade_level: fields.grade_level,
            board: fields.board,
            source_type: fields.source_type,
            source_meta: fields.source_meta,
            created_at: now,
            updated_at: now,
        };
        tables.documents.push(doc.clone());
        Ok(doc)
    }

    async fn find_owned_document(&self, id: i64, owner_id: &str) -> PortResult<Option<Document>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .documents
            .iter()
            .find(|d| d.id == id && d.owner_id == owner_id)
            .cloned())
    }

    async fn list_documents_by_owner(&self, owner_id: &str) -> PortResult<Vec<Document>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .documents
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_document(
        &self,
        id: i64,
        fields: DocumentFields,
    ) -> PortResult<Option<Document>> {
        let mut tables = self.tables.lock().await;
        let Some(doc) = tables.documents.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        doc.title = fields.title;
        doc.description = fields.description;
        doc.subject = fields.subject;
        doc.grade_level = fields.grade_level;
        doc.board = fields.board;
        doc.source_type = fields.source_type;
        doc.source_meta = fields.source_meta;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn get_page(&self, id: i64) -> PortResult<Option<Page>> {
        let tables = self.tables.lock().await;
        Ok(tables.pages.iter().find(|p| p.id == id).cloned())
    }

    async fn list_pages_for_document(&self, document_id: i64) -> PortResult<Vec<Page>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .pages
            .iter()
            .filter(|p| p.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn create_page(&self, document_id: i64, fields: PageFields) -> PortResult<Page> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let page = Page {
            id: tables.next_id(PAGES),
            document_id,
            page_number: fields.page_number,
            image_url: fields.image_url,
            ocr_text: fields.ocr_text,
            ocr_blocks: fields.ocr_blocks,
            created_at: now,
            updated_at: now,
        };
        tables.pages.push(page.clone());
        Ok(page)
    }

    async fn replace_page(&self, id: i64, fields: PageFields) -> PortResult<Option<Page>> {
        let mut tables = self.tables.lock().await;
        let Some(page) = tables.pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        page.page_number = fields.page_number;
        page.image_url = fields.image_url;
        page.ocr_text = fields.ocr_text;
        page.ocr_blocks = fields.ocr_blocks;
        page.updated_at = Utc::now();
        Ok(Some(page.clone()))
    }

    async fn delete_page(&self, id: i64, document_id: i64) -> PortResult<Option<Page>> {
        let mut tables = self.tables.lock().await;
        let position = tables
            .pages
            .iter()
            .position(|p| p.id == id && p.document_id == document_id);
        Ok(position.map(|i| tables.pages.remove(i)))
    }

    async fn get_highlight(&self, id: i64) -> PortResult<Option<Highlight>> {
        let tables = self.tables.lock().await;
        Ok(tables.highlights.iter().find(|h| h.id == id).cloned())
    }

    async fn create_highlight(
        &self,
        document_id: i64,
        fields: HighlightFields,
    ) -> PortResult<Highlight> {
        let mut tables = self.tables.lock().await;
        let highlight = Highlight {
            id: tables.next_id(HIGHLIGHTS),
            document_id,
            page_id: fields.page_id,
            highlight_type: fields.highlight_type,
            content: fields.content,
            meta: fields.meta,
            created_at: Utc::now(),
        };
        tables.highlights.push(highlight.clone());
        Ok(highlight)
    }

    async fn replace_highlight(
        &self,
        id: i64,
        fields: HighlightFields,
    ) -> PortResult<Option<Highlight>> {
        let mut tables = self.tables.lock().await;
        let Some(highlight) = tables.highlights.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };
        highlight.page_id = fields.page_id;
        highlight.highlight_type = fields.highlight_type;
        highlight.content = fields.content;
        highlight.meta = fields.meta;
        Ok(Some(highlight.clone()))
    }

    async fn delete_highlight(&self, id: i64, document_id: i64) -> PortResult<Option<Highlight>> {
        let mut tables = self.tables.lock().await;
        let position = tables
            .highlights
            .iter()
            .position(|h| h.id == id && h.document_id == document_id);
        Ok(position.map(|i| tables.highlights.remove(i)))
    }

    async fn create_scan_job(&self, job: NewScanJob) -> PortResult<ScanJob> {
        let mut tables = self.tables.lock().await;
        let job = ScanJob {
            id: tables.next_id(SCAN_JOBS),
            document_id: job.document_id,
            page_id: job.page_id,
            user_id: job.user_id,
            job_type: job.job_type,
            input: job.input,
            output: job.output,
            status: job.status,
            created_at: Utc::now(),
        };
        tables.scan_jobs.push(job.clone());
        Ok(job)
    }

    async fn list_scan_jobs_by_user(&self, user_id: &str) -> PortResult<Vec<ScanJob>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .scan_jobs
            .iter()
            .filter(|j| j.user_id == user_id)
            .cloned()
            .collect())
    }
}
