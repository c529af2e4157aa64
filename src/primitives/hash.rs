//! One-way hash functions producing a 32-byte digest.

use super::PrimitiveError;
use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Digest length in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A deterministic, collision-resistant hash with a fixed 32-byte output.
pub trait HashFunction {
    /// Hashes `data`, which may be empty.
    fn hash(&self, data: &[u8]) -> Result<[u8; DIGEST_SIZE], PrimitiveError>;
}

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 - the reference Fortuna hash.
    #[default]
    Sha256,
    /// BLAKE3 - fast alternative with the same digest size.
    Blake3,
}

impl HashFunction for HashAlgorithm {
    fn hash(&self, data: &[u8]) -> Result<[u8; DIGEST_SIZE], PrimitiveError> {
        let digest: [u8; DIGEST_SIZE] = match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                hasher.finalize().into()
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = Blake3Hasher::new();
                hasher.update(data);
                *hasher.finalize().as_bytes()
            }
        };
        Ok(digest)
    }
}
