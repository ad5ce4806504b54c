//! Lead capture: scored submissions, local storage, CSV export, and the
//! optional relay to an external assessments endpoint.

pub mod domain;
pub mod export;
pub mod relay;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    LeadFilter, LeadId, LeadRecord, LeadStatus, LeadSubmission, LeadSummaryView,
    LeadValidationError, TrackingContext,
};
pub use export::{write_csv, ExportError};
pub use relay::{HttpLeadRelay, RelayWorker};
pub use repository::{LeadRelay, LeadRepository, NoopRelay, RelayError, RepositoryError};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError};
pub use store::JsonFileLeadRepository;
