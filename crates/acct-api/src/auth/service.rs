//! Authentication service layer
//!
//! Composes the registration policy, the password hasher and the token
//! issuer with the user store to implement registration, login and
//! token-gated profile access. Holds no mutable state: the signing secret
//! and hashing parameters are fixed at construction.
//!
//! Every store failure, including "no such user", is reported as
//! `AppError::Internal` and is never retried.

use super::jwt::{issue_token, strip_bearer_prefix, verify_token, JwtConfig};
use super::models::{
    LoginRequest, LoginResponse, ProfileResponse, RegistrationRequest, RegistrationResponse,
    UpdateProfileRequest,
};
use super::password::{hash_password, verify_password, PasswordConfig};
use super::policy::validate_registration;
use crate::audit::{audit_log, AuditEvent};
use crate::error::AppError;
use acct_core::{AuthConfig, NewUser, UserId, UserStore};
use std::sync::Arc;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt_config: JwtConfig,
    password_config: PasswordConfig,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
    ) -> Self {
        Self {
            store,
            jwt_config,
            password_config,
        }
    }

    /// Create a service from the `[auth]` configuration section
    pub fn from_config(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self::new(store, JwtConfig::from(config), PasswordConfig::from(config))
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `Ok(RegistrationResponse)` - Identifier of the new user
    /// * `Err(AppError::Policy)` - First registration rule the input breaks
    /// * `Err(AppError::Internal)` - Hashing or store failure, including a
    ///   phone number that is already registered
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationResponse, AppError> {
        if let Err(violation) = validate_registration(&request) {
            audit_log(&AuditEvent::RegistrationFailure {
                phone_number: request.phone_number,
                reason: violation.to_string(),
            });
            return Err(violation.into());
        }

        let RegistrationRequest {
            full_name,
            phone_number,
            password,
        } = request;

        let password_hash = hash_password(&password, &self.password_config)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;
        drop(password);

        let id = match self
            .store
            .insert_user(NewUser::new(phone_number.clone(), full_name, password_hash))
            .await
        {
            Ok(id) => id,
            Err(e) => {
                audit_log(&AuditEvent::RegistrationFailure {
                    phone_number,
                    reason: "store rejected insert".to_string(),
                });
                return Err(AppError::Internal(format!("Failed to create user: {e}")));
            }
        };

        audit_log(&AuditEvent::RegistrationSuccess {
            user_id: id,
            phone_number,
        });

        Ok(RegistrationResponse { id })
    }

    /// Login with phone number and password
    ///
    /// The login counter is incremented only after the password matched and
    /// the token was issued. If the increment fails the whole login fails
    /// and the token is discarded.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - User id and bearer token
    /// * `Err(AppError::CredentialMismatch)` - Wrong password
    /// * `Err(AppError::Internal)` - Unknown phone number or store failure
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match self.store.find_user_by_phone(&request.phone_number).await {
            Ok(user) => user,
            Err(e) => {
                audit_log(&AuditEvent::LoginFailure {
                    phone_number: request.phone_number,
                    reason: "user lookup failed".to_string(),
                });
                return Err(AppError::Internal(format!("Failed to fetch user: {e}")));
            }
        };

        if !verify_password(&request.password, &user.password_hash) {
            audit_log(&AuditEvent::LoginFailure {
                phone_number: request.phone_number,
                reason: "credential mismatch".to_string(),
            });
            return Err(AppError::CredentialMismatch);
        }

        let token = issue_token(&self.jwt_config, user.id)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {e}")))?;

        self.store
            .update_login_count(user.id, user.login_count + 1)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update login count: {e}")))?;

        audit_log(&AuditEvent::LoginSuccess {
            user_id: user.id,
            phone_number: user.phone_number,
        });

        Ok(LoginResponse {
            id: user.id,
            jwt: token,
        })
    }

    /// Resolve an Authorization header value to a user id
    ///
    /// A missing `Bearer ` prefix is tolerated. Every verification failure
    /// maps to the same `AppError::Unauthorized`.
    pub fn authorize(&self, authorization: &str) -> Result<UserId, AppError> {
        let token = strip_bearer_prefix(authorization);

        verify_token(&self.jwt_config, token).map_err(|e| {
            audit_log(&AuditEvent::InvalidToken {
                reason: e.to_string(),
            });
            AppError::Unauthorized
        })
    }

    /// Get the profile of the token holder
    pub async fn get_profile(&self, authorization: &str) -> Result<ProfileResponse, AppError> {
        let user_id = self.authorize(authorization)?;

        let user = self
            .store
            .find_user_by_id(user_id)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch user: {e}")))?;

        Ok(ProfileResponse {
            full_name: user.full_name,
            phone_number: user.phone_number,
        })
    }

    /// Update the profile of the token holder
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Name updated, or nothing to update
    /// * `Err(AppError::Unauthorized)` - Token did not verify
    /// * `Err(AppError::Conflict)` - Request tried to set the phone number
    /// * `Err(AppError::Internal)` - Store failure
    pub async fn update_profile(
        &self,
        authorization: &str,
        request: UpdateProfileRequest,
    ) -> Result<(), AppError> {
        let user_id = self.authorize(authorization)?;

        if request.phone_number.is_some() {
            audit_log(&AuditEvent::ProfileUpdateRejected {
                user_id,
                reason: "phone number is immutable".to_string(),
            });
            return Err(AppError::Conflict("phone_number".to_string()));
        }

        let Some(full_name) = request.full_name else {
            return Ok(());
        };

        self.store
            .update_full_name(user_id, &full_name)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update full name: {e}")))?;

        audit_log(&AuditEvent::ProfileUpdated { user_id });

        Ok(())
    }
}
