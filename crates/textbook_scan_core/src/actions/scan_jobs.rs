//! Scan job actions: record a request, list the caller's jobs.

use std::collections::HashSet;

use tracing::info;
use validator::Validate;

use super::{found, owned_document};
use crate::domain::{AuthContext, NewScanJob, ScanJob};
use crate::error::ActionResult;
use crate::inputs::{CreateScanJobInput, ListScanJobsInput};
use crate::ports::DatabaseService;

/// Records a scan job for the acting user.
///
/// A supplied `pageId` is only checked for existence. It is not required to
/// belong to `documentId`, nor to a document the caller owns.
pub async fn create_scan_job(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: CreateScanJobInput,
) -> ActionResult<ScanJob> {
    input.validate()?;

    if let Some(document_id) = input.document_id {
        owned_document(db, auth, document_id).await?;
    }
    if let Some(page_id) = input.page_id {
        found(db.get_page(page_id).await?)?;
    }

    let job = db
        .create_scan_job(NewScanJob {
            document_id: input.document_id,
            page_id: input.page_id,
            user_id: auth.user_id.clone(),
            job_type: input.job_type.unwrap_or_default(),
            input: input.input,
            output: input.output,
            status: input.status.unwrap_or_default(),
        })
        .await?;
    info!(job_id = job.id, job_type = %job.job_type, status = %job.status, "scan job recorded");
    Ok(job)
}

/// Lists the caller's jobs, dropping any tied to a document they do not own.
pub async fn list_scan_jobs(
    db: &dyn DatabaseService,
    auth: &AuthContext,
    input: ListScanJobsInput,
) -> ActionResult<Vec<ScanJob>> {
    let owned: HashSet<i64> = db
        .list_documents_by_owner(&auth.user_id)
        .await?
        .into_iter()
        .map(|d| d.id)
        .collect();

    let jobs = db.list_scan_jobs_by_user(&auth.user_id).await?;
    Ok(jobs
        .into_iter()
        .filter(|job| job.document_id.map_or(true, |id| owned.contains(&id)))
        .filter(|job| input.document_id.map_or(true, |id| job.document_id == Some(id)))
        .filter(|job| input.page_id.map_or(true, |id| job.page_id == Some(id)))
        .filter(|job| input.status.map_or(true, |status| job.status == status))
        .collect())
}
