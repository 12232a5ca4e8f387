//! acct API - account service over HTTP/JSON
//!
//! Registration, login and token-gated profile access on top of a
//! [`acct_core::UserStore`].

pub mod audit;
pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, ApiDoc};

/// Router over an empty in-memory store with a fixed secret and the
/// cheapest hashing parameters
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> axum::Router {
    use acct_core::{AppConfig, InMemoryUserStore};
    use std::sync::Arc;

    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config.auth.hash_memory_kib = 8;
    config.auth.hash_time_cost = 1;
    config.auth.hash_parallelism = 1;

    let store = Arc::new(InMemoryUserStore::new());
    create_router(Arc::new(state::AppState::new(config, store)))
}

/// Signing secret used by [`create_router_for_testing`]
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "test-secret";
