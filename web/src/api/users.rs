//! Account endpoints.
//!
//! - `POST /api/users` - Sign up
//! - `POST /api/login` - Check credentials
//!
//! Both answer with the public view `{id, username, email}`; the password
//! never leaves the server.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use campus_events_core::{Credentials, PublicUser, SignUpInput};

/// Create an account.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/api/users \
///   -H "Content-Type: application/json" \
///   -d '{"username": "ada", "password": "hunter2", "email": "ada@university.edu"}'
/// ```
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SignUpInput>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = state.app.accounts().sign_up(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in. Missing fields are a 400, wrong credentials a 401.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<PublicUser>, AppError> {
    Ok(Json(state.app.accounts().login(credentials).await?))
}
