use std::time::Duration;

use axum::{routing::post, Json, Router};
use serde_json::Value;
use tokio::sync::mpsc;

use super::common::*;
use crate::workflows::leads::{HttpLeadRelay, LeadRelay, LeadService, RelayError};

#[tokio::test]
async fn relay_posts_saved_leads() {
    let (received_tx, mut received_rx) = mpsc::unbounded_channel::<Value>();
    let app = Router::new().route(
        "/assessments",
        post(move |Json(payload): Json<Value>| {
            let received_tx = received_tx.clone();
            async move {
                let _ = received_tx.send(payload);
                axum::http::StatusCode::CREATED
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server runs");
    });

    let (relay, worker) = HttpLeadRelay::spawn(
        format!("http://{address}/assessments"),
        Duration::from_secs(5),
    )
    .expect("relay starts");
    let service = LeadService::new(
        std::sync::Arc::new(MemoryRepository::default()),
        std::sync::Arc::new(relay),
    );

    let record = service
        .submit(submission(overloaded_answers()))
        .expect("submission succeeds");
    drop(service);
    worker.finish().await;

    let payload = received_rx.recv().await.expect("payload delivered");
    assert_eq!(payload["id"].as_str(), Some(record.id.0.as_str()));
    assert_eq!(payload["score"].as_f64(), Some(88.0));
    assert_eq!(payload["tier"].as_str(), Some("High"));
}

#[tokio::test]
async fn unreachable_endpoint_is_logged_not_raised() {
    let (relay, worker) = HttpLeadRelay::spawn(
        "http://127.0.0.1:9/assessments",
        Duration::from_millis(500),
    )
    .expect("relay starts");
    let service = LeadService::new(
        std::sync::Arc::new(MemoryRepository::default()),
        std::sync::Arc::new(relay.clone()),
    );

    service
        .submit(submission(streamlined_answers()))
        .expect("submission succeeds despite relay failure");
    drop(service);
    drop(relay);
    worker.finish().await;
}

#[tokio::test]
async fn full_queue_drops_the_record_but_keeps_the_lead() {
    let (relay, worker) = HttpLeadRelay::spawn_with_capacity(
        "http://127.0.0.1:9/assessments",
        Duration::from_millis(500),
        1,
    )
    .expect("relay starts");
    let repository = std::sync::Arc::new(MemoryRepository::default());
    let service = LeadService::new(repository.clone(), std::sync::Arc::new(relay.clone()));

    // The worker has not been polled yet, so the first record fills the queue.
    let first = service
        .submit(submission(overloaded_answers()))
        .expect("first submission succeeds");
    let second = service
        .submit(submission(streamlined_answers()))
        .expect("second submission succeeds despite full queue");

    assert!(matches!(relay.dispatch(&first), Err(RelayError::QueueFull)));
    let stored = repository.records.lock().expect("repository mutex poisoned");
    assert!(stored.contains_key(&first.id));
    assert!(stored.contains_key(&second.id));
    drop(stored);

    drop(service);
    drop(relay);
    worker.finish().await;
}
