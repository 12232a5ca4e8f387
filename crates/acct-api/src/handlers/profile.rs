//! Profile handlers
//!
//! Both endpoints read the `Authorization` header once. A missing or
//! non-UTF-8 header is treated as the empty string, which never verifies.

use crate::auth::{ProfileResponse, UpdateProfileRequest};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use std::sync::Arc;

fn authorization(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Profile of the token holder", body = ProfileResponse),
        (status = 403, description = "Missing or invalid token", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    ),
    security(("bearer" = []))
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.auth.get_profile(authorization(&headers)).await?;

    Ok(Json(profile))
}

/// Update the caller's full name
///
/// The token is checked before the body, so an unauthenticated request
/// with a malformed body is still a 403.
#[utoipa::path(
    put,
    path = "/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Invalid JSON", body = crate::error::ApiError),
        (status = 403, description = "Missing or invalid token", body = crate::error::ApiError),
        (status = 409, description = "Phone number cannot be changed", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    ),
    security(("bearer" = []))
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<JsonBody<UpdateProfileRequest>, AppError>,
) -> Result<Json<()>, AppError> {
    let auth_header = authorization(&headers);

    let request = match payload {
        Ok(JsonBody(request)) => request,
        Err(rejection) => {
            state.auth.authorize(auth_header)?;
            return Err(rejection);
        }
    };

    state.auth.update_profile(auth_header, request).await?;

    Ok(Json(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_header_is_empty() {
        assert_eq!(authorization(&HeaderMap::new()), "");
    }

    #[test]
    fn test_header_value_passed_through() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization(&headers), "Bearer abc");
    }
}
