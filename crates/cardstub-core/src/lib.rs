//! # cardstub-core — Domain Primitives for the Card API Stub
//!
//! Leaf crate of the cardstub workspace: the pieces of the stub with a real
//! design contract, kept free of any HTTP concern so they can be unit-tested
//! in isolation.
//!
//! - [`identifier`] — 24-hex entity identifiers and the shared hex-shape
//!   check applied to every identifier-bearing parameter.
//! - [`credentials`] — syntactic validation of the API key/token pair.
//! - [`position`] — the fractional ordering-key allocator for cards within
//!   a list.
//! - [`digest`] — streaming SHA-256 accumulation for attachment ingestion.
//!
//! ## Crate Policy
//!
//! - No dependencies on the server crate (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod credentials;
pub mod digest;
pub mod error;
pub mod identifier;
pub mod position;

pub use credentials::validate_credentials;
pub use digest::Sha256Accumulator;
pub use error::ValidationError;
pub use identifier::{is_hex_id, EntityId, ENTITY_ID_LEN};
pub use position::Position;
