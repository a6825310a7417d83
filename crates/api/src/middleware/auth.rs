//! # Authentication Module
//!
//! Reads the caller's bearer token into a [`Session`] that handlers pass on
//! to the backend explicitly. Role checks stay with the backend.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use medisys_client::Session;
use medisys_core::errors::BookingError;

use super::error_handling::AppError;

/// Extractor yielding the caller's [`Session`].
///
/// A missing header gives an anonymous session; a header that is present but
/// not of the form `Bearer <token>` is rejected with `401`.
#[derive(Debug, Clone)]
pub struct SessionContext(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(SessionContext(Session::anonymous()));
        };

        let token = value
            .to_str()
            .ok()
            .and_then(parse_bearer)
            .ok_or_else(|| {
                BookingError::Authentication("Invalid authorization header format".to_string())
            })?;

        Ok(SessionContext(Session::with_token(token)))
    }
}

/// The token of a `Bearer <token>` header value, scheme matched case-insensitively.
pub fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
