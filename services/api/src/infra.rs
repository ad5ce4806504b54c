use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use systems_scorecard::config::AppConfig;
use systems_scorecard::error::AppError;
use systems_scorecard::workflows::leads::{
    HttpLeadRelay, JsonFileLeadRepository, LeadRecord, LeadRelay, LeadService, RelayError,
    RelayWorker,
};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Relay chosen at startup: HTTP when an assessments endpoint is configured.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredRelay {
    Disabled,
    Http(HttpLeadRelay),
}

impl LeadRelay for ConfiguredRelay {
    fn dispatch(&self, record: &LeadRecord) -> Result<(), RelayError> {
        match self {
            ConfiguredRelay::Disabled => Ok(()),
            ConfiguredRelay::Http(relay) => relay.dispatch(record),
        }
    }
}

pub(crate) type ScorecardLeadService = LeadService<JsonFileLeadRepository, ConfiguredRelay>;

/// Wire the file-backed lead store and relay from configuration.
///
/// The returned worker, when present, must be awaited after the service is
/// dropped so queued deliveries are flushed.
pub(crate) fn build_lead_service(
    config: &AppConfig,
) -> Result<(ScorecardLeadService, Option<RelayWorker>), AppError> {
    let repository = Arc::new(JsonFileLeadRepository::new(&config.storage.leads_path));

    let (relay, worker) = match config.relay.endpoint.as_deref() {
        Some(endpoint) => {
            let (relay, worker) = HttpLeadRelay::spawn(endpoint, config.relay.timeout)?;
            info!(%endpoint, "lead relay enabled");
            (ConfiguredRelay::Http(relay), Some(worker))
        }
        None => (ConfiguredRelay::Disabled, None),
    };

    Ok((LeadService::new(repository, Arc::new(relay)), worker))
}
