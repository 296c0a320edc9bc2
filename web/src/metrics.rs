//! Prometheus export of the engine's counters.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Errors from metrics setup.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to install the Prometheus recorder
    #[error("Failed to install metrics recorder: {0}")]
    Install(String),
}

/// Install the Prometheus recorder as the global `metrics` recorder and
/// describe the engine's counters.
///
/// # Errors
///
/// Returns [`MetricsError::Install`] if a global recorder is already set.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    campus_events_core::metrics::describe_metrics();
    tracing::info!("Prometheus recorder installed, serving GET /metrics");
    Ok(handle)
}

/// `GET /metrics`: Prometheus text format, or 404 when export is disabled.
#[allow(clippy::unused_async)]
pub async fn render_metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics export disabled".to_string()),
    }
}
