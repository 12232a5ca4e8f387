//! JWT token generation and validation
//!
//! Tokens are compact HS256 JWTs whose payload carries the user id and
//! nothing else. Validity depends only on the signature: there is no
//! server-side session and, unless `expiration_secs` is configured, no
//! expiry claim.

use acct_core::{AuthConfig, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Scheme prefix expected on the Authorization header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Tokens are issued with HS256; any HMAC variant signed with the shared
/// secret verifies.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims
///
/// Decoding fails when `id` is missing or is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    pub id: UserId,
    /// Expiration timestamp (Unix epoch), only set when expiry is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// JWT token generation and validation errors
///
/// Callers must not expose which variant occurred.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token format")]
    InvalidToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token lifetime of {0} seconds is out of range")]
    ExpirationOverflow(u64),

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Token lifetime in seconds; `None` issues tokens without `exp`
    pub expiration_secs: Option<u64>,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_secs: None,
        }
    }

    pub fn with_expiration(mut self, secs: u64) -> Self {
        self.expiration_secs = Some(secs);
        self
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        if self.expiration_secs.is_some() {
            validation.set_required_spec_claims(&["exp"]);
            validation.validate_exp = true;
        }

        validation
    }
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration_secs: config.token_expiration_secs,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_secs", &self.expiration_secs)
            .finish()
    }
}

/// Issue a signed token for a user
///
/// # Example
///
/// ```
/// use acct_api::auth::jwt::{issue_token, verify_token, JwtConfig};
///
/// let config = JwtConfig::new("somesecret123");
/// let token = issue_token(&config, 123).unwrap();
/// assert_eq!(verify_token(&config, &token).unwrap(), 123);
/// ```
pub fn issue_token(config: &JwtConfig, user_id: UserId) -> Result<String, JwtError> {
    let exp = match config.expiration_secs {
        Some(secs) => Some(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)?
                .as_secs()
                .checked_add(secs)
                .ok_or(JwtError::ExpirationOverflow(secs))?,
        ),
        None => None,
    };

    let claims = Claims { id: user_id, exp };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify a token and return the user id it carries
///
/// Checks structure, then the signature, then decodes the typed claims.
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<UserId, JwtError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
        jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => JwtError::InvalidClaims,
        _ => JwtError::InvalidToken,
    })?;

    Ok(token_data.claims.id)
}

/// Strip the `Bearer ` scheme from an Authorization header value
///
/// A value without the prefix is returned unchanged.
pub fn strip_bearer_prefix(header_value: &str) -> &str {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .unwrap_or(header_value)
}
