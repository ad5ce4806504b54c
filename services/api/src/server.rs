use crate::cli::ServeArgs;
use crate::infra::{build_lead_service, AppState};
use crate::routes::with_scorecard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use systems_scorecard::config::AppConfig;
use systems_scorecard::error::AppError;
use systems_scorecard::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (lead_service, relay_worker) = build_lead_service(&config)?;

    let app = with_scorecard_routes(Arc::new(lead_service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        leads_path = %config.storage.leads_path.display(),
        "systems scorecard ready"
    );

    axum::serve(listener, app).await?;

    if let Some(worker) = relay_worker {
        worker.finish().await;
    }
    Ok(())
}
