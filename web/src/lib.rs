//! HTTP API for the campus events catalog.
//!
//! Thin Axum handlers over [`campus_events_core::CampusEvents`]: each one
//! extracts its input, calls a single core operation and maps the result.
//! [`CatalogError`](campus_events_core::CatalogError) becomes an
//! [`AppError`] with a JSON `{code, message}` body.
//!
//! # Example
//!
//! ```no_run
//! use campus_events_core::{CampusEvents, InMemoryStorage};
//! use campus_events_web::{build_router, AppState};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Arc::new(CampusEvents::new(Arc::new(InMemoryStorage::default())));
//! let router = build_router(AppState::new(app));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod health;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use middleware::{correlation_id_layer, CorrelationId, CORRELATION_ID_HEADER};
pub use routes::build_router;
pub use state::AppState;
