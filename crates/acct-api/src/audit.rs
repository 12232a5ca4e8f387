//! Security audit logging for authentication events
//!
//! All audit events are logged at INFO level with the "audit" target,
//! making them easy to filter and route to security monitoring systems.
//! Events never carry passwords, password hashes or tokens.
//!
//! # Example
//!
//! ```ignore
//! use acct_api::audit::{audit_log, AuditEvent};
//!
//! audit_log(&AuditEvent::LoginSuccess {
//!     user_id: 42,
//!     phone_number: "+62811223344".to_string(),
//! });
//! ```

use acct_core::UserId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Security audit events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Account created
    RegistrationSuccess {
        user_id: UserId,
        phone_number: String,
    },

    /// Registration rejected by policy or store
    RegistrationFailure {
        phone_number: String,
        reason: String,
    },

    /// Credentials accepted and token issued
    LoginSuccess {
        user_id: UserId,
        phone_number: String,
    },

    /// Login refused
    LoginFailure {
        phone_number: String,
        reason: String,
    },

    /// Bearer token failed verification
    InvalidToken { reason: String },

    /// Full name changed
    ProfileUpdated { user_id: UserId },

    /// Profile update refused
    ProfileUpdateRejected { user_id: UserId, reason: String },
}

impl AuditEvent {
    fn summary(&self) -> &'static str {
        match self {
            AuditEvent::RegistrationSuccess { .. } => "Registration successful",
            AuditEvent::RegistrationFailure { .. } => "Registration failed",
            AuditEvent::LoginSuccess { .. } => "Login successful",
            AuditEvent::LoginFailure { .. } => "Login failed",
            AuditEvent::InvalidToken { .. } => "Invalid token",
            AuditEvent::ProfileUpdated { .. } => "Profile updated",
            AuditEvent::ProfileUpdateRejected { .. } => "Profile update rejected",
        }
    }
}

/// Log a security audit event with structured fields
///
/// The event is also serialized to JSON in the `event` field for log
/// aggregators:
///
/// ```json
/// {"event_type":"login_success","user_id":42,"phone_number":"+62811223344"}
/// ```
pub fn audit_log(event: &AuditEvent) {
    let timestamp = Utc::now();

    let event_json = serde_json::to_string(event)
        .unwrap_or_else(|e| format!("{{\"error\":\"Failed to serialize audit event: {e}\"}}"));

    let summary = event.summary();

    match event {
        AuditEvent::RegistrationSuccess {
            user_id,
            phone_number,
        }
        | AuditEvent::LoginSuccess {
            user_id,
            phone_number,
        } => {
            info!(
                target: "audit",
                timestamp = %timestamp,
                event = %event_json,
                user_id = %user_id,
                phone_number = %phone_number,
                "{summary}"
            );
        }
        AuditEvent::RegistrationFailure {
            phone_number,
            reason,
        }
        | AuditEvent::LoginFailure {
            phone_number,
            reason,
        } => {
            info!(
                target: "audit",
                timestamp = %timestamp,
                event = %event_json,
                phone_number = %phone_number,
                reason = %reason,
                "{summary}"
            );
        }
        AuditEvent::InvalidToken { reason } => {
            info!(
                target: "audit",
                timestamp = %timestamp,
                event = %event_json,
                reason = %reason,
                "{summary}"
            );
        }
        AuditEvent::ProfileUpdated { user_id } => {
            info!(
                target: "audit",
                timestamp = %timestamp,
                event = %event_json,
                user_id = %user_id,
                "{summary}"
            );
        }
        AuditEvent::ProfileUpdateRejected { user_id, reason } => {
            info!(
                target: "audit",
                timestamp = %timestamp,
                event = %event_json,
                user_id = %user_id,
                reason = %reason,
                "{summary}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_event_serialization() {
        let event = AuditEvent::LoginSuccess {
            user_id: 42,
            phone_number: "+62811223344".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("login_success"));
        assert!(json.contains("+62811223344"));
    }

    #[test]
    fn test_audit_log_all_events() {
        // Only ensures logging never panics
        let events = [
            AuditEvent::RegistrationSuccess {
                user_id: 1,
                phone_number: "+62811223344".to_string(),
            },
            AuditEvent::RegistrationFailure {
                phone_number: "+6211".to_string(),
                reason: "phone number must be at least 10 characters".to_string(),
            },
            AuditEvent::LoginSuccess {
                user_id: 1,
                phone_number: "+62811223344".to_string(),
            },
            AuditEvent::LoginFailure {
                phone_number: "+62811223344".to_string(),
                reason: "credential mismatch".to_string(),
            },
            AuditEvent::InvalidToken {
                reason: "Invalid token signature".to_string(),
            },
            AuditEvent::ProfileUpdated { user_id: 1 },
            AuditEvent::ProfileUpdateRejected {
                user_id: 1,
                reason: "phone number is immutable".to_string(),
            },
        ];

        for event in &events {
            audit_log(event);
        }
    }

    #[test]
    fn test_event_round_trip() {
        let event = AuditEvent::ProfileUpdateRejected {
            user_id: 7,
            reason: "phone number is immutable".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
