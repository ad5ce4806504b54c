use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    LeadFilter, LeadId, LeadRecord, LeadStatus, LeadSubmission, LeadValidationError,
};
use super::export::{write_csv, ExportError};
use super::repository::{LeadRelay, LeadRepository, RepositoryError};
use crate::workflows::assessment::{compute_score, talking_points};

/// Service composing scoring, lead storage, and the outbound relay.
pub struct LeadService<R, L> {
    repository: Arc<R>,
    relay: Arc<L>,
}

impl<R, L> LeadService<R, L>
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    pub fn new(repository: Arc<R>, relay: Arc<L>) -> Self {
        Self { repository, relay }
    }

    /// Score the answers and persist the lead. The relay hand-off never fails the submission.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadServiceError> {
        submission.validate()?;

        let result = compute_score(&submission.answers);
        let record = LeadRecord {
            id: LeadId::generate(),
            prospect_name: submission.prospect_name.trim().to_string(),
            prospect_email: submission.prospect_email.trim().to_string(),
            talking_points: talking_points(&submission.answers, result.tier),
            answers: submission.answers,
            score: result.score,
            tier: result.tier,
            breakdown: result.breakdown,
            submitted_at: Utc::now(),
            status: LeadStatus::New,
            tracking: submission.tracking,
        };

        let stored = self.repository.save(record)?;
        info!(
            lead_id = %stored.id,
            score = stored.score,
            tier = stored.tier.label(),
            "lead saved"
        );

        if let Err(err) = self.relay.dispatch(&stored) {
            warn!(lead_id = %stored.id, error = %err, "lead relay skipped");
        }

        Ok(stored)
    }

    /// Leads matching the filter, newest first.
    pub fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, LeadServiceError> {
        let mut records = self.repository.list(filter)?;
        records.sort_by(|left, right| right.submitted_at.cmp(&left.submitted_at));
        Ok(records)
    }

    pub fn get(&self, id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn update_status(
        &self,
        id: &LeadId,
        status: LeadStatus,
    ) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self.get(id)?;
        let previous = record.status;
        record.status = status;
        self.repository.update(record.clone())?;
        info!(
            lead_id = %id,
            from = previous.label(),
            to = status.label(),
            "lead status updated"
        );
        Ok(record)
    }

    pub fn delete(&self, id: &LeadId) -> Result<(), LeadServiceError> {
        self.repository.delete(id)?;
        info!(lead_id = %id, "lead deleted");
        Ok(())
    }

    /// Write matching leads as CSV, returning how many rows were written.
    pub fn export_csv<W: Write>(
        &self,
        filter: &LeadFilter,
        writer: W,
    ) -> Result<usize, LeadServiceError> {
        let records = self.list(filter)?;
        let written = write_csv(&records, writer)?;
        info!(leads = written, "lead export written");
        Ok(written)
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Invalid(#[from] LeadValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
