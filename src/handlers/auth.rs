// src/handlers/auth.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, LoginResponse},
    utils::{credentials::SharedAuthenticator, extract::ValidJson, jwt::sign_jwt},
};

/// Checks the credentials against the fixed table.
///
/// On success returns a bearer token whose subject is the username.
/// Bad credentials keep the `{ success, message }` body with status 401.
pub async fn login(
    State(credentials): State<SharedAuthenticator>,
    State(config): State<Config>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Response, AppError> {
    if !credentials.authenticate(&payload.username, &payload.password) {
        tracing::info!(username = %payload.username, "Login rejected");
        return Ok((StatusCode::UNAUTHORIZED, Json(LoginResponse::rejected())).into_response());
    }

    let token = sign_jwt(&payload.username, &config.jwt_secret, config.jwt_expiration)?;
    tracing::info!(username = %payload.username, "Login successful");

    Ok(Json(LoginResponse::accepted(token)).into_response())
}
