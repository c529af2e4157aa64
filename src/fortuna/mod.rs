//! The generator facade.
//!
//! [`Fortuna`] owns one accumulator, one generator and one seed store and
//! wires them together:
//!
//! ```text
//! entropy → accumulator pools ──reseed──► hash ──► generator key
//!                                                 └──► seed store
//! caller ◄── random_bytes ◄── generator blocks (AES-256 over counter)
//! ```
//!
//! For use from several threads wrap the facade in a [`SharedFortuna`].

mod shared;

pub use shared::SharedFortuna;

use crate::accumulator::{EntropyAccumulator, PoolConfig};
use crate::config::FortunaConfig;
use crate::error::Result;
use crate::generator::{Generator, GeneratorConfig};
use crate::metrics::MetricsSnapshot;
use crate::primitives::{
    Aes256Ctr, BlockCipher, HashAlgorithm, HashFunction, BLOCK_SIZE,
};
use crate::storage::SeedStore;
use rand_core::{CryptoRng, RngCore};

/// A Fortuna CSPRNG instance.
///
/// Construction keys the generator from the store's seed, synthesizing
/// one on first run. Callers feed entropy with [`Fortuna::add_entropy`],
/// fold it into the key with [`Fortuna::reseed`], and draw output with
/// [`Fortuna::random_bytes`].
///
/// # Security Model
///
/// - Reseeding with empty pools is legal but yields a fixed, public key;
///   feed entropy before every reseed
/// - Every reseed overwrites the stored seed, so a restart never replays
///   output from an older key
/// - Persistence failures are returned, never swallowed
pub struct Fortuna<S, H = HashAlgorithm, C = Aes256Ctr> {
    generator: Generator<H, C>,
    accumulator: EntropyAccumulator<H>,
    store: S,
    reseed_count: u64,
}

impl<S: SeedStore> Fortuna<S> {
    /// Opens a generator over `store` with SHA-256 and AES-256.
    pub fn open(store: S) -> Result<Self> {
        Self::with_primitives(
            store,
            HashAlgorithm::default(),
            Aes256Ctr,
            PoolConfig::default(),
            GeneratorConfig::default(),
        )
    }

    /// Opens a generator over `store` using the settings in `config`.
    pub fn from_config(store: S, config: &FortunaConfig) -> Result<Self> {
        config.validate()?;
        Self::with_primitives(
            store,
            config.accumulator.hash,
            Aes256Ctr,
            config.pool_config(),
            config.generator_config(),
        )
    }
}

impl<S, H, C> Fortuna<S, H, C>
where
    S: SeedStore,
    H: HashFunction + Clone,
    C: BlockCipher,
{
    /// Opens a generator with explicitly injected primitives.
    pub fn with_primitives(
        mut store: S,
        hasher: H,
        cipher: C,
        pool_config: PoolConfig,
        generator_config: GeneratorConfig,
    ) -> Result<Self> {
        let seed = store.load_seed()?;
        let generator = Generator::new(&seed, hasher.clone(), cipher, generator_config);
        let accumulator = EntropyAccumulator::new(hasher, pool_config);

        tracing::info!(
            rekey_threshold = generator.rekey_threshold(),
            "Fortuna generator keyed from stored seed"
        );

        Ok(Self {
            generator,
            accumulator,
            store,
            reseed_count: 0,
        })
    }

    /// Adds entropy from `source_id` to pool `source_id mod 32`.
    pub fn add_entropy(&mut self, data: &[u8], source_id: u32) {
        self.accumulator.add_entropy(data, source_id);
    }

    /// Rekeys the generator from the accumulated entropy and persists the
    /// new seed.
    ///
    /// The generator key is replaced before the seed is written; a write
    /// failure is returned to the caller with the new key already active.
    pub fn reseed(&mut self) -> Result<()> {
        let pool_bytes = self.accumulator.size_bytes();
        if pool_bytes == 0 {
            tracing::warn!("Reseeding from empty pools; the new key is a public constant");
        }

        let seed = self.accumulator.get_reseed_entropy()?;
        self.generator.set_key(&seed);
        self.store.save_seed(&seed)?;
        self.reseed_count += 1;

        tracing::info!(
            reseed_count = self.reseed_count,
            pool_bytes,
            "Generator reseeded from entropy pools"
        );
        Ok(())
    }

    /// Returns exactly `n` pseudorandom bytes.
    pub fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; n];
        self.fill_bytes_checked(&mut out)?;
        Ok(out)
    }

    /// Fills `dest` with generator output, one block per 16 bytes; the
    /// final block is truncated to fit.
    pub fn fill_bytes_checked(&mut self, dest: &mut [u8]) -> Result<()> {
        for chunk in dest.chunks_mut(BLOCK_SIZE) {
            let block = self.generator.generate_block()?;
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        Ok(())
    }

    /// Returns the number of successful reseeds.
    pub fn reseed_count(&self) -> u64 {
        self.reseed_count
    }

    /// Returns the seed store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Captures the current state for metrics export.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reseed_count: self.reseed_count,
            rekey_count: self.generator.rekey_count(),
            blocks_generated: self.generator.counter(),
            bytes_since_rekey: self.generator.bytes_since_rekey(),
            pool_size_bytes: self.accumulator.size_bytes(),
            entropy_bytes_added: self.accumulator.total_bytes_added(),
            entropy_bytes_dropped: self.accumulator.dropped_bytes(),
        }
    }
}

impl<S, H, C> RngCore for Fortuna<S, H, C>
where
    S: SeedStore,
    H: HashFunction + Clone,
    C: BlockCipher,
{
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.fill_bytes_checked(dest) {
            panic!("Fortuna generator failed: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes_checked(dest).map_err(rand_core::Error::new)
    }
}

impl<S, H, C> CryptoRng for Fortuna<S, H, C>
where
    S: SeedStore,
    H: HashFunction + Clone,
    C: BlockCipher,
{
}

impl<S, H, C> std::fmt::Debug for Fortuna<S, H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fortuna")
            .field("generator", &self.generator)
            .field("accumulator", &self.accumulator)
            .field("reseed_count", &self.reseed_count)
            .finish_non_exhaustive()
    }
}
