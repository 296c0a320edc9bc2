//! Custom Axum extractors.
//!
//! Axum's own `Path` and `Json` reject malformed input with plain-text
//! bodies. These wrappers reject with [`AppError`] instead, so every 400
//! carries the same `{code, message}` JSON shape:
//! - `EventPath`: numeric event id from `/events/:id`
//! - `UserPath`: numeric user id from `/users/:userId`
//! - `RegistrationPath`: `(user id, event id)` from `/registrations/:userId/:eventId`
//! - `JsonBody`: a JSON request body
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(state): State<AppState>,
//!     EventPath(id): EventPath,
//!     JsonBody(input): JsonBody<EventPatchInput>,
//! ) -> Result<Json<Event>, AppError> {
//!     Ok(Json(state.app.catalog().update_event(id, input).await?))
//! }
//! ```

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use campus_events_core::{EventId, UserId};
use serde::de::DeserializeOwned;

/// Event id taken from the request path.
#[derive(Debug, Clone, Copy)]
pub struct EventPath(pub EventId);

#[async_trait]
impl<S> FromRequestParts<S> for EventPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("Invalid event ID"))?;

        parse_id(&raw)
            .map(|id| Self(EventId::new(id)))
            .ok_or_else(|| AppError::bad_request("Invalid event ID"))
    }
}

/// User id taken from the request path.
#[derive(Debug, Clone, Copy)]
pub struct UserPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("Invalid user ID"))?;

        parse_id(&raw)
            .map(|id| Self(UserId::new(id)))
            .ok_or_else(|| AppError::bad_request("Invalid user ID"))
    }
}

/// `(user id, event id)` pair taken from the request path.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationPath(pub UserId, pub EventId);

#[async_trait]
impl<S> FromRequestParts<S> for RegistrationPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::bad_request("Invalid user ID or event ID");

        let Path((user, event)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        match (parse_id(&user), parse_id(&event)) {
            (Some(user), Some(event)) => Ok(Self(UserId::new(user), EventId::new(event))),
            _ => Err(invalid()),
        }
    }
}

/// JSON request body whose rejections become [`AppError`]s.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Ids are unsigned decimal integers; anything else is a bad request.
fn parse_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok()
}
