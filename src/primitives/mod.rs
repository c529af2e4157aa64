//! Stateless cryptographic primitives.
//!
//! The accumulator and generator never call a hash or cipher backend
//! directly. They go through the [`HashFunction`] and [`BlockCipher`]
//! traits so that backends can be swapped, and so that tests can inject
//! doubles (including failing ones).

mod cipher;
mod hash;

pub use cipher::{Aes256Ctr, BlockCipher, BLOCK_SIZE, KEY_SIZE};
pub use hash::{HashAlgorithm, HashFunction, DIGEST_SIZE};

use thiserror::Error;

/// Errors surfaced by a primitive backend.
#[derive(Debug, Clone, Error)]
pub enum PrimitiveError {
    /// The backend could not be reached or is misconfigured.
    #[error("primitive backend unavailable: {0}")]
    Unavailable(String),
}
