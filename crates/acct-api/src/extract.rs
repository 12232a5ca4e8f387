//! Request body extraction
//!
//! Bodies are decoded as JSON whatever the `Content-Type` header says.
//! An unreadable body and an undecodable one are both `InvalidJson`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor that ignores the `Content-Type` header
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidJson(rejection.body_text()))?;

        parse_json(&bytes).map(JsonBody)
    }
}

/// Decode a JSON document
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(bytes).map_err(|e| AppError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{RegistrationRequest, UpdateProfileRequest};

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let request: RegistrationRequest = parse_json(br#"{"full_name":"John"}"#).unwrap();
        assert_eq!(request.full_name, "John");
        assert_eq!(request.phone_number, "");
        assert_eq!(request.password, "");
    }

    #[test]
    fn test_malformed_body() {
        let bodies: [&[u8]; 4] = [b"", b"not json", b"{\"full_name\": ", b"[1, 2]"];
        for body in bodies {
            assert!(matches!(
                parse_json::<RegistrationRequest>(body),
                Err(AppError::InvalidJson(_))
            ));
        }
    }

    #[test]
    fn test_wrong_field_type() {
        assert!(matches!(
            parse_json::<UpdateProfileRequest>(br#"{"full_name": 5}"#),
            Err(AppError::InvalidJson(_))
        ));
    }
}
