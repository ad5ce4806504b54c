use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{LeadFilter, LeadId, LeadStatus, LeadSubmission};
use super::repository::{LeadRelay, LeadRepository, RepositoryError};
use super::service::{LeadService, LeadServiceError};

/// Router builder exposing lead submission and management endpoints.
pub fn lead_router<R, L>(service: Arc<LeadService<R, L>>) -> Router
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    Router::new()
        .route(
            "/api/v1/leads",
            post(submit_handler::<R, L>).get(list_handler::<R, L>),
        )
        .route("/api/v1/leads/export", get(export_handler::<R, L>))
        .route(
            "/api/v1/leads/:lead_id",
            get(detail_handler::<R, L>).delete(delete_handler::<R, L>),
        )
        .route("/api/v1/leads/:lead_id/status", patch(status_handler::<R, L>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    pub(crate) status: LeadStatus,
}

pub(crate) async fn submit_handler<R, L>(
    State(service): State<Arc<LeadService<R, L>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    match on_store(service, move |service| service.submit(submission)).await {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn list_handler<R, L>(
    State(service): State<Arc<LeadService<R, L>>>,
    Query(filter): Query<LeadFilter>,
) -> Response
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    match on_store(service, move |service| service.list(&filter)).await {
        Ok(records) => {
            let leads: Vec<_> = records.iter().map(|record| record.summary()).collect();
            (StatusCode::OK, axum::Json(json!({ "leads": leads }))).into_response()
        }
        Err(response) => response,
    }
}

pub(crate) async fn detail_handler<R, L>(
    State(service): State<Arc<LeadService<R, L>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    match on_store(service, move |service| service.get(&LeadId(lead_id))).await {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn status_handler<R, L>(
    State(service): State<Arc<LeadService<R, L>>>,
    Path(lead_id): Path<String>,
    axum::Json(change): axum::Json<StatusChange>,
) -> Response
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    let updated = on_store(service, move |service| {
        service.update_status(&LeadId(lead_id), change.status)
    })
    .await;
    match updated {
        Ok(record) => (StatusCode::OK, axum::Json(record.summary())).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn delete_handler<R, L>(
    State(service): State<Arc<LeadService<R, L>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    match on_store(service, move |service| service.delete(&LeadId(lead_id))).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn export_handler<R, L>(
    State(service): State<Arc<LeadService<R, L>>>,
    Query(filter): Query<LeadFilter>,
) -> Response
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
{
    let exported = on_store(service, move |service| {
        let mut buffer = Vec::new();
        service.export_csv(&filter, &mut buffer).map(|_| buffer)
    })
    .await;
    match exported {
        Ok(buffer) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"leads.csv\"",
                ),
            ],
            buffer,
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Runs a service call on the blocking pool; repositories do synchronous file I/O.
async fn on_store<R, L, T, F>(service: Arc<LeadService<R, L>>, call: F) -> Result<T, Response>
where
    R: LeadRepository + 'static,
    L: LeadRelay + 'static,
    T: Send + 'static,
    F: FnOnce(&LeadService<R, L>) -> Result<T, LeadServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(&service)).await {
        Ok(result) => result.map_err(error_response),
        Err(join_error) => {
            error!(error = %join_error, "lead store task failed");
            let payload = json!({ "error": "lead store task failed" });
            Err((StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response())
        }
    }
}

fn error_response(error: LeadServiceError) -> Response {
    let status = match &error {
        LeadServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LeadServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LeadServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LeadServiceError::Repository(_) | LeadServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
