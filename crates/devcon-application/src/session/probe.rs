//! One-shot backend liveness check.

use devcon_core::backend::ChatBackend;
use devcon_core::chat::SessionAvailability;
use std::sync::Arc;

/// Asks the backend once whether it is up. No retries.
#[derive(Clone)]
pub struct BackendProbe {
    backend: Arc<dyn ChatBackend>,
}

impl BackendProbe {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// A failed check counts as unavailable; it is never surfaced as an error.
    pub async fn check(&self) -> SessionAvailability {
        match self.backend.check_availability().await {
            Ok(reachable) => {
                tracing::debug!(reachable, "[BackendProbe] Status check finished");
                SessionAvailability::from_probe(reachable)
            }
            Err(err) => {
                tracing::warn!(error = %err, "[BackendProbe] Status check failed");
                SessionAvailability::Unavailable
            }
        }
    }
}
