//! # Validation Errors
//!
//! Client-input rejection reasons. The `Display` strings double as the
//! plain-text HTTP response bodies, so the exact wording here is part of the
//! wire contract.

use thiserror::Error;

/// Rejection of a request value before any store is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The key/token pair failed the syntactic shape check.
    #[error("invalid key")]
    InvalidCredentials,

    /// A required request value was absent entirely.
    #[error("{0} required")]
    MissingValue(&'static str),

    /// A supplied identifier or position value failed its shape check.
    #[error("invalid {0} value")]
    InvalidValue(&'static str),

    /// A value was present but unusable for the operation — also covers the
    /// case where no card matches the targeted identifier.
    #[error("invalid value for {0}")]
    UnusableValue(&'static str),
}
