//! Request and response payloads for the account endpoints
//!
//! Credentials only ever appear in request types; none of the response
//! types carry a password or a password hash.

use acct_core::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration request
///
/// Missing fields decode as empty strings and are then rejected by the
/// registration policy.
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegistrationRequest {
    pub full_name: String,
    pub phone_number: String,
    pub password: String,
}

impl RegistrationRequest {
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("full_name", &self.full_name)
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: UserId,
}

/// Login request
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response carrying the bearer token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: UserId,
    pub jwt: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("id", &self.id)
            .field("jwt", &"<redacted>")
            .finish()
    }
}

/// Profile projection returned to the token holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub full_name: String,
    pub phone_number: String,
}

/// Profile update request
///
/// `phone_number` is accepted only so that an attempt to change it can be
/// rejected; any value there fails the update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let request = RegistrationRequest::new("John Does", "+62811223344", "p4Ssword!");
        let rendered = format!("{request:?}");
        assert!(rendered.contains("+62811223344"));
        assert!(!rendered.contains("p4Ssword!"));

        let login = LoginRequest::new("+62811223344", "p4Ssword!");
        assert!(!format!("{login:?}").contains("p4Ssword!"));
    }

    #[test]
    fn test_update_request_fields_are_optional() {
        let request: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(request.full_name.is_none());
        assert!(request.phone_number.is_none());

        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"full_name":"Johnny"}"#).unwrap();
        assert_eq!(request.full_name.as_deref(), Some("Johnny"));
    }

    #[test]
    fn test_login_response_shape() {
        let response = LoginResponse {
            id: 3,
            jwt: "a.b.c".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["jwt"], "a.b.c");
    }
}
