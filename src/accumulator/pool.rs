//! A single entropy pool.
//!
//! Pools are append-only between reseeds and never interpret their
//! contents. Each pool is capped so that high-volume or adversarial input
//! cannot grow memory without bound.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Configuration shared by every pool in an accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum bytes buffered per pool; input past the cap is dropped.
    pub max_bytes: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024, // Cap at 64KB per pool
        }
    }
}

/// An ordered, append-only byte buffer awaiting consolidation.
#[derive(Default)]
pub struct EntropyPool {
    buffer: Vec<u8>,
}

impl EntropyPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends as much of `data` as fits under `max_bytes`.
    ///
    /// Returns the number of bytes accepted.
    pub fn append(&mut self, data: &[u8], max_bytes: usize) -> usize {
        let space_remaining = max_bytes.saturating_sub(self.buffer.len());
        let bytes_to_add = data.len().min(space_remaining);

        self.buffer.extend_from_slice(&data[..bytes_to_add]);
        bytes_to_add
    }

    /// Returns the buffered bytes.
    #[inline]
    pub fn contents(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the pool size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been added since the last clear.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Wipes and empties the pool.
    pub fn clear(&mut self) {
        self.buffer.zeroize();
    }
}

impl std::fmt::Debug for EntropyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyPool")
            .field("bytes", &self.buffer.len())
            .finish()
    }
}

impl Drop for EntropyPool {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_empty_initially() {
        let pool = EntropyPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut pool = EntropyPool::new();
        pool.append(&[1, 2], 100);
        pool.append(&[3], 100);
        assert_eq!(pool.contents(), &[1, 2, 3]);
    }

    #[test]
    fn test_max_bytes_limit() {
        let mut pool = EntropyPool::new();

        // Try to add more than max
        let accepted = pool.append(&[0u8; 100], 10);

        // Should be capped at max_bytes
        assert_eq!(accepted, 10);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.append(&[1u8; 5], 10), 0);
    }

    #[test]
    fn test_clear_empties_pool() {
        let mut pool = EntropyPool::new();
        pool.append(&[9u8; 20], 100);
        pool.clear();
        assert!(pool.is_empty());
    }
}
