//! Seed persistence across process restarts.
//!
//! A store holds exactly one 32-byte seed record. The generator is keyed
//! from it at startup, and every reseed overwrites it, so output stays
//! unpredictable immediately after a restart.
//!
//! Stores are injected into the facade through the [`SeedStore`] trait,
//! which allows an in-memory store for tests and ephemeral instances.

mod file;
mod memory;
mod seed;

pub use file::{FileSeedStore, DEFAULT_SEED_PATH};
pub use memory::MemorySeedStore;
pub use seed::{Seed, SEED_SIZE};

use rand_core::{CryptoRng, OsRng, RngCore};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or synthesizing a seed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record exists but could not be read.
    #[error("failed to read seed from {path}: {source}")]
    Read {
        /// Location of the record.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The record could not be replaced.
    #[error("failed to write seed to {path}: {source}")]
    Write {
        /// Location of the record.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The record is not exactly 32 bytes.
    #[error("stored seed is malformed: expected 32 bytes, found {len}")]
    Malformed {
        /// Length actually found.
        len: usize,
    },
    /// The OS randomness source could not supply a full seed.
    #[error("secure randomness source failed: {0}")]
    Randomness(#[from] rand_core::Error),
}

/// Stable storage for a single seed record.
pub trait SeedStore {
    /// Reads the stored seed.
    ///
    /// Returns `Ok(None)` when no seed has ever been written. Any other
    /// failure to read is an error and must not be reported as absent.
    fn read_seed(&mut self) -> Result<Option<Seed>, StoreError>;

    /// Replaces the stored record with exactly these 32 bytes.
    fn save_seed(&mut self, seed: &Seed) -> Result<(), StoreError>;

    /// Returns the stored seed, synthesizing and persisting one from the
    /// operating system's randomness source on first run.
    fn load_seed(&mut self) -> Result<Seed, StoreError>
    where
        Self: Sized,
    {
        self.load_seed_with(&mut OsRng)
    }

    /// Like [`SeedStore::load_seed`], drawing a fresh seed from `rng`.
    fn load_seed_with<R>(&mut self, rng: &mut R) -> Result<Seed, StoreError>
    where
        R: RngCore + CryptoRng,
        Self: Sized,
    {
        if let Some(seed) = self.read_seed()? {
            tracing::debug!("Loaded existing seed");
            return Ok(seed);
        }

        let mut bytes = [0u8; SEED_SIZE];
        rng.try_fill_bytes(&mut bytes)?;
        let seed = Seed::from_bytes(bytes);
        zeroize::Zeroize::zeroize(&mut bytes);

        self.save_seed(&seed)?;
        tracing::info!("No stored seed found; synthesized a new one");
        Ok(seed)
    }
}
