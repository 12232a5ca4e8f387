//! Authentication and authorization module
//!
//! - Registration policy checks
//! - Password hashing with Argon2
//! - Bearer token issuing and verification
//! - Authentication service orchestrating the above over a `UserStore`

pub mod jwt;
pub mod models;
pub mod password;
pub mod policy;
pub mod service;

pub use jwt::{issue_token, strip_bearer_prefix, verify_token, Claims, JwtConfig, JwtError};
pub use models::{
    LoginRequest, LoginResponse, ProfileResponse, RegistrationRequest, RegistrationResponse,
    UpdateProfileRequest,
};
pub use password::{hash_password, verify_password, PasswordConfig, PasswordError};
pub use policy::{validate_password, validate_registration, PolicyViolation};
pub use service::AuthService;
