//! # Credential Shape Validation
//!
//! The stub never consults a credential database: a request is authorized
//! when its `key` looks like a real API key (32 hex chars) and its `token`
//! looks like a real API token (64 hex chars). Both accept mixed case.
//!
//! This guard runs before any store is read or mutated; the state-dump
//! endpoint is deliberately exempt.

use crate::error::ValidationError;
use crate::identifier::is_hex_id;

/// Hex length of an API key.
pub const KEY_LEN: usize = 32;

/// Hex length of an API token.
pub const TOKEN_LEN: usize = 64;

/// Check the key/token pair for the expected shapes.
///
/// Either value being absent or malformed yields
/// [`ValidationError::InvalidCredentials`].
pub fn validate_credentials(
    key: Option<&str>,
    token: Option<&str>,
) -> Result<(), ValidationError> {
    match (key, token) {
        (Some(k), Some(t)) if is_hex_id(k, KEY_LEN) && is_hex_id(t, TOKEN_LEN) => Ok(()),
        _ => Err(ValidationError::InvalidCredentials),
    }
}
