//! AES-256 block encryption for counter-mode generation.

use super::PrimitiveError;
use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;

/// Cipher block length in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Cipher key length in bytes.
pub const KEY_SIZE: usize = 32;

/// A keyed permutation over 16-byte blocks.
///
/// Implementations carry no state between calls: the counter is owned by
/// the caller, and the key must not outlive the call.
pub trait BlockCipher {
    /// Encrypts a single block under `key`.
    fn encrypt_block(
        &self,
        key: &[u8; KEY_SIZE],
        block: &[u8; BLOCK_SIZE],
    ) -> Result<[u8; BLOCK_SIZE], PrimitiveError>;
}

/// AES-256 applied to one counter block at a time.
///
/// Encrypting successive counter blocks yields the CTR-mode keystream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256Ctr;

impl BlockCipher for Aes256Ctr {
    fn encrypt_block(
        &self,
        key: &[u8; KEY_SIZE],
        block: &[u8; BLOCK_SIZE],
    ) -> Result<[u8; BLOCK_SIZE], PrimitiveError> {
        let cipher = Aes256::new(GenericArray::from_slice(key));
        let mut out = GenericArray::clone_from_slice(block);
        cipher.encrypt_block(&mut out);
        Ok(out.into())
    }
}
