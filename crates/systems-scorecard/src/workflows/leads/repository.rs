use super::domain::{LeadFilter, LeadId, LeadRecord};

/// Storage abstraction for submitted leads. Records are appended and only
/// rewritten for status changes or deletion.
pub trait LeadRepository: Send + Sync {
    fn save(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn delete(&self, id: &LeadId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("stored leads could not be read: {0}")]
    Corrupt(String),
}

/// Outbound hand-off of saved leads to an external system.
///
/// Dispatch is fire-and-forget: implementations queue or drop the record and
/// must not block the caller on network I/O.
pub trait LeadRelay: Send + Sync {
    fn dispatch(&self, record: &LeadRecord) -> Result<(), RelayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay worker has shut down")]
    Closed,
    #[error("relay queue is full")]
    QueueFull,
    #[error("relay transport unavailable: {0}")]
    Transport(String),
}

/// Relay used when no endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRelay;

impl LeadRelay for NoopRelay {
    fn dispatch(&self, _record: &LeadRecord) -> Result<(), RelayError> {
        Ok(())
    }
}
