//! API route definitions and OpenAPI document

use crate::auth::{
    LoginRequest, LoginResponse, ProfileResponse, RegistrationRequest, RegistrationResponse,
    UpdateProfileRequest,
};
use crate::error::ApiError;
use crate::handlers::{auth, health, profile};
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "acct API",
        description = "Account registration, login and profile access"
    ),
    paths(
        auth::register_handler,
        auth::login_handler,
        profile::get_profile_handler,
        profile::update_profile_handler,
        health::health_check,
    ),
    components(schemas(
        RegistrationRequest,
        RegistrationResponse,
        LoginRequest,
        LoginResponse,
        ProfileResponse,
        UpdateProfileRequest,
        ApiError,
        health::HealthResponse,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "profile", description = "Token-gated profile access"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Account routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/registration", post(auth::register_handler))
        .route("/login", post(auth::login_handler))
        .route(
            "/profile",
            get(profile::get_profile_handler).put(profile::update_profile_handler),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .merge(api_routes())
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
