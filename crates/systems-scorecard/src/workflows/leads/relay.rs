use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::domain::LeadRecord;
use super::repository::{LeadRelay, RelayError};

/// Records waiting for delivery before new ones are dropped.
pub const RELAY_QUEUE_CAPACITY: usize = 256;

/// Posts saved leads as JSON to an operator-configured endpoint.
///
/// Records are queued to a background task so submission never waits on the
/// network. Delivery failures are logged and dropped, as are records that
/// arrive while the queue is full.
#[derive(Debug, Clone)]
pub struct HttpLeadRelay {
    sender: mpsc::Sender<LeadRecord>,
}

/// Handle to the background delivery task.
#[derive(Debug)]
pub struct RelayWorker {
    handle: JoinHandle<()>,
}

impl HttpLeadRelay {
    /// Start the delivery task. Must be called from within a tokio runtime.
    pub fn spawn(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<(Self, RelayWorker), RelayError> {
        Self::spawn_with_capacity(endpoint, timeout, RELAY_QUEUE_CAPACITY)
    }

    pub fn spawn_with_capacity(
        endpoint: impl Into<String>,
        timeout: Duration,
        capacity: usize,
    ) -> Result<(Self, RelayWorker), RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(deliver(client, endpoint.into(), receiver));
        Ok((Self { sender }, RelayWorker { handle }))
    }
}

impl LeadRelay for HttpLeadRelay {
    fn dispatch(&self, record: &LeadRecord) -> Result<(), RelayError> {
        self.sender
            .try_send(record.clone())
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => RelayError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => RelayError::Closed,
            })
    }
}

impl RelayWorker {
    /// Wait for queued deliveries. Returns once every relay handle has been dropped.
    pub async fn finish(self) {
        if let Err(err) = self.handle.await {
            warn!(error = %err, "lead relay worker stopped unexpectedly");
        }
    }
}

async fn deliver(
    client: reqwest::Client,
    endpoint: String,
    mut receiver: mpsc::Receiver<LeadRecord>,
) {
    while let Some(record) = receiver.recv().await {
        match client.post(&endpoint).json(&record).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(lead_id = %record.id, "lead relayed");
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(lead_id = %record.id, %status, body = %body, "lead relay rejected; kept locally");
            }
            Err(err) => {
                warn!(lead_id = %record.id, error = %err, "lead relay failed; kept locally");
            }
        }
    }
}
