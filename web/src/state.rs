//! Application state shared across all HTTP handlers.

use campus_events_core::CampusEvents;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state for Axum handlers.
///
/// Cloned per request; everything inside is behind an `Arc`, so every
/// handler goes through the same registration engine and its lock.
#[derive(Clone)]
pub struct AppState {
    /// Catalog, registrations, queries and accounts over one store
    pub app: Arc<CampusEvents>,
    /// Prometheus renderer, when metrics export is enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state without metrics export.
    #[must_use]
    pub fn new(app: Arc<CampusEvents>) -> Self {
        Self { app, metrics: None }
    }

    /// Attach a Prometheus handle for `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("metrics_enabled", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
