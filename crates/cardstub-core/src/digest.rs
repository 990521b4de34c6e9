//! # Streaming Content Digests
//!
//! SHA-256 accumulation for attachment ingestion: the uploaded payload is
//! fed through [`Sha256Accumulator`] chunk by chunk in a single linear pass,
//! so the digest is available without a second whole-body allocation.

use sha2::{Digest, Sha256};

/// Incremental SHA-256 over a byte stream.
#[derive(Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Start a fresh accumulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb the next chunk of the stream.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    /// Finish the accumulation, rendering the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        self.hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
