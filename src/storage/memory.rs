//! In-memory seed store for tests and ephemeral generators.

use super::{Seed, SeedStore, StoreError};

/// Keeps the seed record in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemorySeedStore {
    seed: Option<Seed>,
    writes: u64,
}

impl MemorySeedStore {
    /// Creates an empty store, as on first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `seed`.
    pub fn with_seed(seed: Seed) -> Self {
        Self {
            seed: Some(seed),
            writes: 0,
        }
    }

    /// Returns the currently stored seed.
    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    /// Returns how many times a seed has been saved.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl SeedStore for MemorySeedStore {
    fn read_seed(&mut self) -> Result<Option<Seed>, StoreError> {
        Ok(self.seed.clone())
    }

    fn save_seed(&mut self, seed: &Seed) -> Result<(), StoreError> {
        self.seed = Some(seed.clone());
        self.writes += 1;
        Ok(())
    }
}
