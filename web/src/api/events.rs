//! Event catalog endpoints.
//!
//! - `GET /api/events` - All events, chronological
//! - `GET /api/events/category/:category` - Events of one category
//! - `GET /api/events/search/:query` - Case-insensitive text search
//! - `GET /api/events/:id` - One event with its registration count
//! - `GET /api/events/:id/registrations/count` - Registration count
//! - `POST /api/events` - Create an event
//! - `PUT /api/events/:id` - Partially update an event
//! - `DELETE /api/events/:id` - Delete an event

use super::MessageResponse;
use crate::error::AppError;
use crate::extractors::{EventPath, JsonBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campus_events_core::{Category, EntityKind, Event, EventDetails, EventInput, EventPatchInput};
use serde::Serialize;

/// Response for the registration count endpoint.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Number of registrations
    pub count: usize,
}

/// List all events, earliest first.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/api/events
/// ```
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.app.queries().list_events().await?))
}

/// List events of one category, earliest first.
///
/// The match is exact and case-sensitive; an unknown category name simply
/// matches nothing.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/api/events/category/career
/// ```
pub async fn list_events_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    let Ok(category) = category.parse::<Category>() else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        state.app.queries().list_events_by_category(category).await?,
    ))
}

/// Search title, description, location and category.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/api/events/search/career
/// ```
pub async fn search_events(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.app.queries().search_events(&query).await?))
}

/// Get one event with its current registration count.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/api/events/1
/// # {"id":1,"title":"Annual Tech Symposium",...,"registrationCount":1}
/// ```
pub async fn get_event(
    State(state): State<AppState>,
    EventPath(id): EventPath,
) -> Result<Json<EventDetails>, AppError> {
    state
        .app
        .queries()
        .event_details(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(EntityKind::Event))
}

/// Count registrations for an event; 0 for an unknown event.
pub async fn registration_count(
    State(state): State<AppState>,
    EventPath(id): EventPath,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.app.queries().registration_count(id).await?;
    Ok(Json(CountResponse { count }))
}

/// Create an event.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/api/events \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Chess Night",
///     "description": "Casual games, all levels welcome",
///     "date": "2023-12-01",
///     "startTime": "19:00",
///     "endTime": "22:00",
///     "location": "Library",
///     "capacity": 40,
///     "category": "social",
///     "organizerId": 1
///   }'
/// ```
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<EventInput>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.app.catalog().create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update the fields present in the body.
pub async fn update_event(
    State(state): State<AppState>,
    EventPath(id): EventPath,
    JsonBody(input): JsonBody<EventPatchInput>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.app.catalog().update_event(id, input).await?))
}

/// Delete an event. Its registrations are kept.
pub async fn delete_event(
    State(state): State<AppState>,
    EventPath(id): EventPath,
) -> Result<Json<MessageResponse>, AppError> {
    state.app.catalog().delete_event(id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
