//! Counter-mode DRBG with hash-based rekeying.
//!
//! # Rekeying Model
//!
//! After `rekey_threshold` bytes of output the key is replaced with
//! `hash(key)` and the byte count restarts from zero. The counter is never
//! reset: it increases by exactly one per block for the lifetime of the
//! generator.
//!
//! The new key is derived from the current key directly, not from the next
//! two generator blocks as in canonical Fortuna.

use super::counter::encode_counter_block;
use crate::error::FortunaError;
use crate::primitives::{
    Aes256Ctr, BlockCipher, HashAlgorithm, HashFunction, BLOCK_SIZE, KEY_SIZE,
};
use crate::storage::Seed;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Output volume after which the generator rekeys (1 MiB).
pub const DEFAULT_REKEY_THRESHOLD: u64 = 1024 * 1024;

/// Generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Bytes of output produced under one key before rekeying.
    pub rekey_threshold: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rekey_threshold: DEFAULT_REKEY_THRESHOLD,
        }
    }
}

/// Produces 16-byte blocks by encrypting an incrementing counter.
///
/// Output is a pure function of `(key, counter)`: two generators with the
/// same key and counter produce identical blocks.
pub struct Generator<H = HashAlgorithm, C = Aes256Ctr> {
    key: [u8; KEY_SIZE],
    counter: u64,
    bytes_since_rekey: u64,
    rekey_count: u64,
    config: GeneratorConfig,
    hasher: H,
    cipher: C,
}

impl<H: HashFunction, C: BlockCipher> Generator<H, C> {
    /// Creates a generator keyed with `seed`, counter at zero.
    pub fn new(seed: &Seed, hasher: H, cipher: C, config: GeneratorConfig) -> Self {
        Self {
            key: *seed.as_bytes(),
            counter: 0,
            bytes_since_rekey: 0,
            rekey_count: 0,
            config,
            hasher,
            cipher,
        }
    }

    /// Produces the next output block.
    ///
    /// Rekeys once cumulative output since the last rekey reaches the
    /// threshold; the returned block is always encrypted under the key in
    /// effect when the call began. A failed call leaves the key, counter
    /// and byte count unchanged.
    pub fn generate_block(&mut self) -> Result<[u8; BLOCK_SIZE], FortunaError> {
        let next = self
            .counter
            .checked_add(1)
            .ok_or(FortunaError::CounterExhausted)?;

        let mut counter_block = encode_counter_block(self.counter);
        let block = self.cipher.encrypt_block(&self.key, &counter_block);
        counter_block.zeroize();
        let block = block?;

        let produced = self.bytes_since_rekey + BLOCK_SIZE as u64;
        let next_key = if produced >= self.config.rekey_threshold {
            Some(self.hasher.hash(&self.key)?)
        } else {
            None
        };

        self.counter = next;
        self.bytes_since_rekey = produced;
        if let Some(mut key) = next_key {
            self.install_rekey(&key);
            key.zeroize();
        }

        Ok(block)
    }

    /// Replaces the key with `hash(key)` and resets the byte count.
    pub fn rekey(&mut self) -> Result<(), FortunaError> {
        let mut next = self.hasher.hash(&self.key)?;
        self.install_rekey(&next);
        next.zeroize();
        Ok(())
    }

    fn install_rekey(&mut self, next: &[u8; KEY_SIZE]) {
        self.key.copy_from_slice(next);
        self.bytes_since_rekey = 0;
        self.rekey_count += 1;

        tracing::debug!(
            rekey_count = self.rekey_count,
            counter = self.counter,
            "Generator rekeyed"
        );
    }

    /// Overwrites the key. The counter and byte count are untouched.
    pub fn set_key(&mut self, seed: &Seed) {
        self.key.zeroize();
        self.key = *seed.as_bytes();
    }

    /// Returns the counter value the next block will use.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Returns bytes produced since the last rekey.
    pub fn bytes_since_rekey(&self) -> u64 {
        self.bytes_since_rekey
    }

    /// Returns the number of rekeys performed.
    pub fn rekey_count(&self) -> u64 {
        self.rekey_count
    }

    /// Returns the configured rekey threshold.
    pub fn rekey_threshold(&self) -> u64 {
        self.config.rekey_threshold
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn set_counter_for_testing(&mut self, counter: u64) {
        self.counter = counter;
    }
}

impl<H, C> Drop for Generator<H, C> {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl<H, C> std::fmt::Debug for Generator<H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("counter", &self.counter)
            .field("bytes_since_rekey", &self.bytes_since_rekey)
            .field("rekey_count", &self.rekey_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::decode_counter_block;
    use crate::primitives::PrimitiveError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make_generator(key: u8, threshold: u64) -> Generator {
        Generator::new(
            &Seed::from_bytes([key; KEY_SIZE]),
            HashAlgorithm::Sha256,
            Aes256Ctr,
            GeneratorConfig {
                rekey_threshold: threshold,
            },
        )
    }

    /// Cipher double that records every counter block it is handed.
    #[derive(Clone, Default)]
    struct RecordingCipher {
        seen: Rc<RefCell<Vec<u64>>>,
    }

    impl BlockCipher for RecordingCipher {
        fn encrypt_block(
            &self,
            key: &[u8; KEY_SIZE],
            block: &[u8; BLOCK_SIZE],
        ) -> Result<[u8; BLOCK_SIZE], PrimitiveError> {
            let counter = decode_counter_block(block).expect("high bytes must be zero");
            self.seen.borrow_mut().push(counter);
            Aes256Ctr.encrypt_block(key, block)
        }
    }

    /// Hash double that fails on its first `failures` calls, then defers to SHA-256.
    #[derive(Clone)]
    struct FlakyHash {
        failures: Rc<RefCell<u32>>,
    }

    impl FlakyHash {
        fn failing(times: u32) -> Self {
            Self {
                failures: Rc::new(RefCell::new(times)),
            }
        }
    }

    impl HashFunction for FlakyHash {
        fn hash(&self, data: &[u8]) -> Result<[u8; KEY_SIZE], PrimitiveError> {
            let mut failures = self.failures.borrow_mut();
            if *failures > 0 {
                *failures -= 1;
                return Err(PrimitiveError::Unavailable("hash offline".into()));
            }
            HashAlgorithm::Sha256.hash(data)
        }
    }

    struct FailingCipher;

    impl BlockCipher for FailingCipher {
        fn encrypt_block(
            &self,
            _key: &[u8; KEY_SIZE],
            _block: &[u8; BLOCK_SIZE],
        ) -> Result<[u8; BLOCK_SIZE], PrimitiveError> {
            Err(PrimitiveError::Unavailable("cipher offline".into()))
        }
    }

    #[test]
    fn test_block_is_encrypted_counter() {
        let mut gen = make_generator(0x07, DEFAULT_REKEY_THRESHOLD);

        let block = gen.generate_block().unwrap();
        let expected = Aes256Ctr
            .encrypt_block(&[0x07; KEY_SIZE], &encode_counter_block(0))
            .unwrap();

        assert_eq!(block, expected);
        assert_eq!(gen.counter(), 1);
        assert_eq!(gen.bytes_since_rekey(), 16);
    }

    #[test]
    fn test_identical_state_identical_output() {
        let mut a = make_generator(0x42, DEFAULT_REKEY_THRESHOLD);
        let mut b = make_generator(0x42, DEFAULT_REKEY_THRESHOLD);

        for _ in 0..8 {
            assert_eq!(a.generate_block().unwrap(), b.generate_block().unwrap());
        }
    }

    #[test]
    fn test_consecutive_counters() {
        let cipher = RecordingCipher::default();
        let mut gen = Generator::new(
            &Seed::from_bytes([1; KEY_SIZE]),
            HashAlgorithm::Sha256,
            cipher.clone(),
            GeneratorConfig::default(),
        );
        gen.set_counter_for_testing(1000);

        for _ in 0..5 {
            gen.generate_block().unwrap();
        }

        assert_eq!(*cipher.seen.borrow(), vec![1000, 1001, 1002, 1003, 1004]);
    }

    #[test]
    fn test_rekey_at_threshold() {
        let mut gen = make_generator(0x01, 32);
        let key_before = *gen.key();

        let first = gen.generate_block().unwrap();
        assert_eq!(gen.rekey_count(), 0);
        assert_eq!(gen.key(), &key_before);

        // The second block reaches 32 bytes and triggers the rekey.
        let second = gen.generate_block().unwrap();
        let expected_second = Aes256Ctr
            .encrypt_block(&key_before, &encode_counter_block(1))
            .unwrap();

        assert_eq!(second, expected_second);
        assert_ne!(first, second);
        assert_eq!(gen.rekey_count(), 1);
        assert_eq!(gen.bytes_since_rekey(), 0);

        let key_after = HashAlgorithm::Sha256.hash(&key_before).unwrap();
        assert_eq!(gen.key(), &key_after);

        // Counter survives the rekey.
        assert_eq!(gen.counter(), 2);
        let third = gen.generate_block().unwrap();
        let expected_third = Aes256Ctr
            .encrypt_block(&key_after, &encode_counter_block(2))
            .unwrap();
        assert_eq!(third, expected_third);
    }

    #[test]
    fn test_default_threshold_rekeys_after_one_mib() {
        let mut gen = make_generator(0x09, DEFAULT_REKEY_THRESHOLD);
        let blocks = DEFAULT_REKEY_THRESHOLD / BLOCK_SIZE as u64;

        for _ in 0..blocks - 1 {
            gen.generate_block().unwrap();
        }
        assert_eq!(gen.rekey_count(), 0);
        assert_eq!(gen.bytes_since_rekey(), DEFAULT_REKEY_THRESHOLD - 16);

        gen.generate_block().unwrap();
        assert_eq!(gen.rekey_count(), 1);
        assert_eq!(gen.bytes_since_rekey(), 0);
        assert_eq!(gen.counter(), blocks);
    }

    #[test]
    fn test_explicit_rekey_hashes_key() {
        let mut gen = make_generator(0x0F, DEFAULT_REKEY_THRESHOLD);
        gen.generate_block().unwrap();

        gen.rekey().unwrap();
        assert_eq!(gen.key(), &HashAlgorithm::Sha256.hash(&[0x0F; KEY_SIZE]).unwrap());
        assert_eq!(gen.bytes_since_rekey(), 0);
        assert_eq!(gen.counter(), 1);
    }

    #[test]
    fn test_set_key_keeps_counter_and_count() {
        let mut gen = make_generator(0x01, DEFAULT_REKEY_THRESHOLD);
        gen.generate_block().unwrap();
        gen.generate_block().unwrap();

        gen.set_key(&Seed::from_bytes([0xEE; KEY_SIZE]));

        assert_eq!(gen.key(), &[0xEE; KEY_SIZE]);
        assert_eq!(gen.counter(), 2);
        assert_eq!(gen.bytes_since_rekey(), 32);
    }

    #[test]
    fn test_counter_exhaustion_reported() {
        let mut gen = make_generator(0x01, DEFAULT_REKEY_THRESHOLD);
        gen.set_counter_for_testing(u64::MAX);

        assert!(matches!(
            gen.generate_block(),
            Err(FortunaError::CounterExhausted)
        ));
        assert_eq!(gen.counter(), u64::MAX);
    }

    #[test]
    fn test_failed_rekey_leaves_state_unchanged() {
        let key = [0x31u8; KEY_SIZE];
        let mut gen = Generator::new(
            &Seed::from_bytes(key),
            FlakyHash::failing(1),
            Aes256Ctr,
            GeneratorConfig {
                rekey_threshold: 32,
            },
        );

        gen.generate_block().unwrap();

        // The block that would reach the threshold fails during rekey.
        assert!(matches!(
            gen.generate_block(),
            Err(FortunaError::Primitive(PrimitiveError::Unavailable(_)))
        ));
        assert_eq!(gen.counter(), 1);
        assert_eq!(gen.bytes_since_rekey(), 16);
        assert_eq!(gen.rekey_count(), 0);
        assert_eq!(gen.key(), &key);

        // Retrying reproduces the same block and completes the rekey.
        let retried = gen.generate_block().unwrap();
        let expected = Aes256Ctr.encrypt_block(&key, &encode_counter_block(1)).unwrap();
        assert_eq!(retried, expected);
        assert_eq!(gen.counter(), 2);
        assert_eq!(gen.bytes_since_rekey(), 0);
        assert_eq!(gen.rekey_count(), 1);
        assert_eq!(gen.key(), &HashAlgorithm::Sha256.hash(&key).unwrap());

        // No block past the threshold is produced under the old key.
        let next = gen.generate_block().unwrap();
        assert_ne!(next, Aes256Ctr.encrypt_block(&key, &encode_counter_block(2)).unwrap());
    }

    #[test]
    fn test_cipher_failure_surfaces() {
        let mut gen = Generator::new(
            &Seed::from_bytes([0; KEY_SIZE]),
            HashAlgorithm::Sha256,
            FailingCipher,
            GeneratorConfig::default(),
        );

        assert!(matches!(
            gen.generate_block(),
            Err(FortunaError::Primitive(PrimitiveError::Unavailable(_)))
        ));
        assert_eq!(gen.counter(), 0);
        assert_eq!(gen.bytes_since_rekey(), 0);
    }
}
