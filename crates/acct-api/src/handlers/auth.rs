//! Registration and login handlers

use crate::auth::{LoginRequest, LoginResponse, RegistrationRequest, RegistrationResponse};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Register a new user account
///
/// # Request Body
///
/// * `full_name` - 3 to 60 characters
/// * `phone_number` - 12 to 15 characters
/// * `password` - 6 to 64 characters with at least one capital and one
///   non-letter character
///
/// # Responses
///
/// * `200 OK` - User registered, returns the new id
/// * `400 Bad Request` - Invalid JSON or a broken registration rule; missing
///   fields count as empty
/// * `500 Internal Server Error` - Store failure, including a taken phone number
#[utoipa::path(
    post,
    path = "/registration",
    tag = "auth",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "User registered successfully", body = RegistrationResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<RegistrationRequest>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let response = state.auth.register(request).await?;

    Ok(Json(response))
}

/// Login with phone number and password
///
/// # Responses
///
/// * `200 OK` - Returns the user id and a bearer token
/// * `400 Bad Request` - Invalid JSON or wrong password
/// * `500 Internal Server Error` - Unknown phone number or store failure
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input or credentials", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = state.auth.login(request).await?;

    Ok(Json(response))
}
