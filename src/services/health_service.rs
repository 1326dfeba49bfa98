use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the service health, probing the store for connectivity.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    if let Err(err) = state.store().health_check().await {
        warn!(error = %err, "storage health check failed");
        return HealthResponse::degraded();
    }

    HealthResponse::ok()
}
