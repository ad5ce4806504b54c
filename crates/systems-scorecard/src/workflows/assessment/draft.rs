use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::QuestionnaireAnswers;
use super::progress::QuestionnaireSection;

/// In-progress questionnaire saved between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    pub answers: QuestionnaireAnswers,
    pub current_section: QuestionnaireSection,
    pub saved_at: DateTime<Utc>,
}

impl AssessmentDraft {
    pub fn new(answers: QuestionnaireAnswers, current_section: QuestionnaireSection) -> Self {
        Self {
            answers,
            current_section,
            saved_at: Utc::now(),
        }
    }
}

/// Storage for the single draft a respondent keeps while filling in the questionnaire.
pub trait DraftStore: Send + Sync {
    fn load(&self) -> Result<Option<AssessmentDraft>, DraftError>;
    fn save(&self, draft: &AssessmentDraft) -> Result<(), DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keeps the draft as a pretty-printed JSON document on disk. Saves go through
/// a staging file that is renamed over the previous draft.
#[derive(Debug, Clone)]
pub struct JsonFileDraftStore {
    path: PathBuf,
}

impl JsonFileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for JsonFileDraftStore {
    fn load(&self) -> Result<Option<AssessmentDraft>, DraftError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, draft: &AssessmentDraft) -> Result<(), DraftError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(draft)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), DraftError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
