use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::{
    Criticality, QuestionnaireAnswers, ReportFrequency, SystemPerformance, TeamSize, YesNo,
};
use crate::workflows::leads::domain::{
    LeadFilter, LeadId, LeadRecord, LeadSubmission, TrackingContext,
};
use crate::workflows::leads::repository::{
    LeadRelay, LeadRepository, RelayError, RepositoryError,
};
use crate::workflows::leads::{lead_router, LeadService};

fn uniform_performance(rating: u8) -> SystemPerformance {
    SystemPerformance {
        ease_of_use: Some(rating),
        workflow_efficiency: Some(rating),
        data_accuracy_confidence: Some(rating),
        reporting_timeliness: Some(rating),
        integration_level: Some(rating),
        automation_level: Some(rating),
        team_satisfaction: Some(rating),
    }
}

/// Large team juggling many weak systems; scores 88 (High).
pub(super) fn overloaded_answers() -> QuestionnaireAnswers {
    let mut answers = QuestionnaireAnswers::default();
    answers.business_snapshot.industry = ["Construction".to_string()].into();
    answers.business_snapshot.team_size = Some(TeamSize::Large);
    answers.business_snapshot.systems_count = Some(12);
    answers.system_performance = uniform_performance(2);
    answers.pain_points.time_consuming_processes = ["Invoicing".to_string()].into();
    answers.pain_points.manual_workarounds = Some(YesNo::Yes);
    answers.pain_points.critical_to_fix = Some(Criticality::High);
    answers.pain_points.support_growth = Some(YesNo::No);
    answers.reporting_decisions.data_confidence = Some(2);
    answers.reporting_decisions.report_frequency = [ReportFrequency::Monthly].into();
    answers
}

/// Small team on a couple of well-liked tools; scores 13 (Low).
pub(super) fn streamlined_answers() -> QuestionnaireAnswers {
    let mut answers = QuestionnaireAnswers::default();
    answers.business_snapshot.team_size = Some(TeamSize::Small);
    answers.business_snapshot.systems_count = Some(2);
    answers.system_performance = uniform_performance(5);
    answers.pain_points.manual_workarounds = Some(YesNo::No);
    answers.reporting_decisions.data_confidence = Some(5);
    answers.reporting_decisions.report_frequency = [ReportFrequency::Daily].into();
    answers
}

pub(super) fn submission(answers: QuestionnaireAnswers) -> LeadSubmission {
    LeadSubmission {
        prospect_name: "Morgan Reyes".to_string(),
        prospect_email: "morgan@reyesbuild.co".to_string(),
        answers,
        tracking: Some(TrackingContext {
            tracking_id: Some("spring-webinar".to_string()),
            ..TrackingContext::default()
        }),
    }
}

pub(super) fn build_service() -> (
    LeadService<MemoryRepository, RecordingRelay>,
    Arc<MemoryRepository>,
    Arc<RecordingRelay>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let relay = Arc::new(RecordingRelay::default());
    let service = LeadService::new(repository.clone(), relay.clone());
    (service, repository, relay)
}

pub(super) fn lead_router_with_service(
    service: LeadService<MemoryRepository, RecordingRelay>,
) -> axum::Router {
    lead_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<BTreeMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn save(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &LeadId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn save(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn list(&self, _filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn delete(&self, _id: &LeadId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn save(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn list(&self, _filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn delete(&self, _id: &LeadId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingRelay {
    dispatched: Arc<Mutex<Vec<LeadId>>>,
}

impl RecordingRelay {
    pub(super) fn dispatched(&self) -> Vec<LeadId> {
        self.dispatched.lock().expect("relay mutex poisoned").clone()
    }
}

impl LeadRelay for RecordingRelay {
    fn dispatch(&self, record: &LeadRecord) -> Result<(), RelayError> {
        self.dispatched
            .lock()
            .expect("relay mutex poisoned")
            .push(record.id.clone());
        Ok(())
    }
}

pub(super) struct ClosedRelay;

impl LeadRelay for ClosedRelay {
    fn dispatch(&self, _record: &LeadRecord) -> Result<(), RelayError> {
        Err(RelayError::Closed)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
