//! Application state management

use crate::auth::AuthService;
use acct_core::{AppConfig, UserStore};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
///
/// Immutable after startup.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Authentication service
    pub auth: AuthService,
}

impl AppState {
    /// Create new application state over a user store
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        let auth = AuthService::from_config(store, &config.auth);
        Self {
            config,
            start_time: Instant::now(),
            auth,
        }
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
