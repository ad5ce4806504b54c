use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::domain::{LeadFilter, LeadId, LeadRecord};
use super::repository::{LeadRepository, RepositoryError};

/// Lead store kept as a single JSON array on local disk.
///
/// Every operation reads the whole file; writes go to a sibling temp file
/// that is renamed over the original.
#[derive(Debug)]
pub struct JsonFileLeadRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileLeadRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store lock poisoned".to_string()))
    }

    fn read_all(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(RepositoryError::Unavailable(err.to_string())),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|err| RepositoryError::Corrupt(err.to_string()))
    }

    fn write_all(&self, records: &[LeadRecord]) -> Result<(), RepositoryError> {
        let unavailable = |err: std::io::Error| RepositoryError::Unavailable(err.to_string());

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }

        let payload = serde_json::to_vec_pretty(records)
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload).map_err(unavailable)?;
        fs::rename(&staging, &self.path).map_err(unavailable)?;

        debug!(path = %self.path.display(), leads = records.len(), "lead store written");
        Ok(())
    }
}

impl LeadRepository for JsonFileLeadRepository {
    fn save(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let _guard = self.guard()?;
        let mut records = self.read_all()?;
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        records.push(record.clone());
        self.write_all(&records)?;
        Ok(record)
    }

    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        let _guard = self.guard()?;
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let _guard = self.guard()?;
        Ok(self.read_all()?.into_iter().find(|record| &record.id == id))
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let _guard = self.guard()?;
        let mut records = self.read_all()?;
        let slot = records
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        self.write_all(&records)
    }

    fn delete(&self, id: &LeadId) -> Result<(), RepositoryError> {
        let _guard = self.guard()?;
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|record| &record.id != id);
        if records.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.write_all(&records)
    }
}
