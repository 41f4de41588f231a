//! Registration and login handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use namo_core::User;

use super::{MessageResponse, require_field};
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response: the bearer token plus the account's public profile.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let username = require_field(payload.username, "username")?;
    let email = require_field(payload.email, "email")?;
    let password = require_field(payload.password, "password")?;

    let auth = AuthService::new(state.pool(), state.config());
    auth.register(&username, &email, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("user registered successfully")),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>> {
    let email = require_field(payload.email, "email")?;
    let password = require_field(payload.password, "password")?;

    let auth = AuthService::new(state.pool(), state.config());
    let (token, user) = auth.login(&email, &password).await?;

    Ok(Json(LoginResponse { token, user }))
}
