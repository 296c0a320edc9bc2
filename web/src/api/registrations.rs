//! Registration endpoints.
//!
//! - `POST /api/registrations` - Register a user for an event
//! - `DELETE /api/registrations/:userId/:eventId` - Cancel a registration
//! - `GET /api/users/:userId/registrations` - A user's registrations
//! - `GET /api/users/:userId/events` - Events a user is registered for

use super::MessageResponse;
use crate::error::AppError;
use crate::extractors::{JsonBody, RegistrationPath, UserPath};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use campus_events_core::{Event, EventId, Registration, UserId};
use serde::Deserialize;

/// Request to register a user for an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Registering user
    pub user_id: UserId,
    /// Target event
    pub event_id: EventId,
}

/// Register a user for an event.
///
/// Fails with 404 if the event or user is missing, and 400 if the user is
/// already registered or the event is full.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/api/registrations \
///   -H "Content-Type: application/json" \
///   -d '{"userId": 1, "eventId": 2}'
/// ```
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    let registration = state
        .app
        .registrations()
        .register(request.user_id, request.event_id)
        .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Cancel a registration.
pub async fn cancel(
    State(state): State<AppState>,
    RegistrationPath(user_id, event_id): RegistrationPath,
) -> Result<Json<MessageResponse>, AppError> {
    state.app.registrations().cancel(user_id, event_id).await?;
    Ok(Json(MessageResponse::new(
        "Registration cancelled successfully",
    )))
}

/// A user's registrations, oldest first.
pub async fn user_registrations(
    State(state): State<AppState>,
    UserPath(user_id): UserPath,
) -> Result<Json<Vec<Registration>>, AppError> {
    Ok(Json(
        state.app.queries().user_registrations(user_id).await?,
    ))
}

/// Events a user is registered for. Deleted events are left out.
pub async fn user_events(
    State(state): State<AppState>,
    UserPath(user_id): UserPath,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.app.queries().user_events(user_id).await?))
}
