//! # Entity Identifiers
//!
//! Every entity the stub creates — cards and attachments alike — is keyed by
//! a 24-character lowercase hex identifier, derived from a freshly generated
//! 128-bit UUID truncated to 24 hex characters (~96 bits of entropy).
//! Uniqueness is probabilistic; no collision check is performed against the
//! stores.
//!
//! Identifier-shaped *inputs* (`idList`, the `cardid` path segment) are
//! checked with [`is_hex_id`], which accepts either case — comparison against
//! stored identifiers is the caller's concern.

use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;

/// Length of a generated entity identifier, in hex characters.
pub const ENTITY_ID_LEN: usize = 24;

/// Returns true when `value` is exactly `len` hex characters, either case.
pub fn is_hex_id(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate an identifier-shaped request value, naming the offending field
/// in the error.
pub fn ensure_hex_id(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if is_hex_id(value, ENTITY_ID_LEN) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue(field))
    }
}

/// A generated entity identifier: 24 lowercase hex characters, immutable.
///
/// Serializes as its bare string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(ENTITY_ID_LEN);
        Self(hex)
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
