//! Bearer-token extraction and verification

use crate::auth::jwt::{validate_token, Claims};
use crate::error::{Error, Result};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers.get(AUTHORIZATION).ok_or(Error::MissingCredential)?;
    let value = value.to_str().map_err(|_| Error::MalformedCredential)?;
    value
        .strip_prefix("Bearer ")
        .ok_or(Error::MalformedCredential)
}

/// Authenticate a request from its headers, returning the verified claims.
///
/// Purely cryptographic - no store lookups. Authorization stays with the
/// caller: compare the returned role against what the operation requires.
pub fn authenticate(headers: &HeaderMap, access_secret: &str) -> Result<Claims> {
    validate_token(bearer_token(headers)?, access_secret)
}
