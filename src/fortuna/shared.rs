//! Thread-safe handle to a single generator.
//!
//! Entropy injection, reseeding and block generation all read and then
//! write shared state, so every operation runs under one mutex per
//! generator instance.

use super::Fortuna;
use crate::error::{FortunaError, Result};
use crate::metrics::MetricsSnapshot;
use crate::primitives::{Aes256Ctr, BlockCipher, HashAlgorithm, HashFunction};
use crate::storage::SeedStore;
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable, lock-protected [`Fortuna`].
pub struct SharedFortuna<S, H = HashAlgorithm, C = Aes256Ctr> {
    inner: Arc<Mutex<Fortuna<S, H, C>>>,
}

impl<S, H, C> SharedFortuna<S, H, C>
where
    S: SeedStore,
    H: HashFunction + Clone,
    C: BlockCipher,
{
    /// Wraps an existing generator.
    pub fn new(fortuna: Fortuna<S, H, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(fortuna)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Fortuna<S, H, C>>> {
        self.inner.lock().map_err(|_| FortunaError::Poisoned)
    }

    /// See [`Fortuna::add_entropy`].
    pub fn add_entropy(&self, data: &[u8], source_id: u32) -> Result<()> {
        self.lock()?.add_entropy(data, source_id);
        Ok(())
    }

    /// See [`Fortuna::reseed`].
    pub fn reseed(&self) -> Result<()> {
        self.lock()?.reseed()
    }

    /// See [`Fortuna::random_bytes`].
    pub fn random_bytes(&self, n: usize) -> Result<Vec<u8>> {
        self.lock()?.random_bytes(n)
    }

    /// See [`Fortuna::snapshot`].
    pub fn snapshot(&self) -> Result<MetricsSnapshot> {
        Ok(self.lock()?.snapshot())
    }
}

impl<S, H, C> Clone for SharedFortuna<S, H, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, H, C> From<Fortuna<S, H, C>> for SharedFortuna<S, H, C>
where
    S: SeedStore,
    H: HashFunction + Clone,
    C: BlockCipher,
{
    fn from(fortuna: Fortuna<S, H, C>) -> Self {
        Self::new(fortuna)
    }
}
