//! Multi-pool entropy accumulation.
//!
//! Incoming entropy is routed to one of [`POOL_COUNT`] independent pools by
//! source identifier. A reseed concatenates every pool in index order,
//! hashes the result into a [`Seed`], and clears all pools.

mod pool;

pub use pool::{EntropyPool, PoolConfig};

use crate::primitives::{HashAlgorithm, HashFunction, PrimitiveError};
use crate::storage::Seed;

/// Number of pools held by an accumulator.
pub const POOL_COUNT: usize = 32;

/// Maps a source identifier onto its pool index.
#[inline]
pub fn pool_index(source_id: u32) -> usize {
    source_id as usize % POOL_COUNT
}

/// Collects entropy from many sources into a fixed set of pools.
///
/// No minimum-entropy threshold gates extraction: draining empty pools is
/// legal and yields `hash(empty)`, a fixed public constant.
pub struct EntropyAccumulator<H = HashAlgorithm> {
    pools: [EntropyPool; POOL_COUNT],
    config: PoolConfig,
    hasher: H,
    /// Total bytes accepted across all pools.
    total_bytes_added: u64,
    /// Total bytes rejected by the per-pool cap.
    dropped_bytes: u64,
    /// Number of completed reseed extractions.
    reseed_count: u64,
}

impl<H: HashFunction> EntropyAccumulator<H> {
    /// Creates an accumulator with empty pools.
    pub fn new(hasher: H, config: PoolConfig) -> Self {
        Self {
            pools: std::array::from_fn(|_| EntropyPool::new()),
            config,
            hasher,
            total_bytes_added: 0,
            dropped_bytes: 0,
            reseed_count: 0,
        }
    }

    /// Appends `data` to pool `source_id mod 32`.
    pub fn add_entropy(&mut self, data: &[u8], source_id: u32) {
        let index = pool_index(source_id);
        let accepted = self.pools[index].append(data, self.config.max_bytes);
        let dropped = data.len() - accepted;

        self.total_bytes_added += accepted as u64;
        self.dropped_bytes += dropped as u64;

        if dropped > 0 {
            tracing::debug!(
                pool = index,
                dropped,
                max_bytes = self.config.max_bytes,
                "Entropy pool full; input truncated"
            );
        }

        tracing::trace!(
            pool = index,
            bytes_added = accepted,
            pool_size = self.pools[index].len(),
            "Added entropy to pool"
        );
    }

    /// Hashes all pools, in index order, into a seed and clears them.
    ///
    /// If the hash backend fails the pools are left intact.
    pub fn get_reseed_entropy(&mut self) -> Result<Seed, PrimitiveError> {
        let mut combined = Vec::with_capacity(self.size_bytes());
        for pool in &self.pools {
            combined.extend_from_slice(pool.contents());
        }

        let digest = self.hasher.hash(&combined);
        zeroize::Zeroize::zeroize(&mut combined);
        let seed = Seed::from_bytes(digest?);

        for pool in &mut self.pools {
            pool.clear();
        }
        self.reseed_count += 1;

        tracing::debug!(reseed_count = self.reseed_count, "Drained entropy pools");
        Ok(seed)
    }

    /// Returns the size of pool `index` in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `index >= POOL_COUNT`.
    pub fn pool_len(&self, index: usize) -> usize {
        self.pools[index].len()
    }

    /// Returns the combined size of all pools in bytes.
    pub fn size_bytes(&self) -> usize {
        self.pools.iter().map(EntropyPool::len).sum()
    }

    /// Returns total bytes ever accepted.
    pub fn total_bytes_added(&self) -> u64 {
        self.total_bytes_added
    }

    /// Returns total bytes dropped by the pool cap.
    pub fn dropped_bytes(&self) -> u64 {
        self.dropped_bytes
    }

    /// Returns the number of reseed extractions performed.
    pub fn reseed_count(&self) -> u64 {
        self.reseed_count
    }
}

impl Default for EntropyAccumulator<HashAlgorithm> {
    fn default() -> Self {
        Self::new(HashAlgorithm::default(), PoolConfig::default())
    }
}

impl<H> std::fmt::Debug for EntropyAccumulator<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyAccumulator")
            .field("pool_bytes", &self.pools.iter().map(EntropyPool::len).sum::<usize>())
            .field("total_bytes_added", &self.total_bytes_added)
            .field("reseed_count", &self.reseed_count)
            .finish_non_exhaustive()
    }
}
