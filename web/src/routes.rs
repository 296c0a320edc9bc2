//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use crate::api::{events, registrations, users};
use crate::health::health_check;
use crate::metrics::render_metrics;
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - `GET /health` and `GET /metrics`
/// - Event catalog, registration and account endpoints under `/api`
/// - Request tracing and correlation ids on every route
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Event catalog
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/category/:category",
            get(events::list_events_by_category),
        )
        .route("/events/search/:query", get(events::search_events))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/events/:id/registrations/count",
            get(events::registration_count),
        )
        // Registrations
        .route("/registrations", post(registrations::register))
        .route(
            "/registrations/:userId/:eventId",
            delete(registrations::cancel),
        )
        .route(
            "/users/:userId/registrations",
            get(registrations::user_registrations),
        )
        .route("/users/:userId/events", get(registrations::user_events))
        // Accounts
        .route("/users", post(users::create_user))
        .route("/login", post(users::login));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
