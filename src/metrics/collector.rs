//! Metrics collection and registry.

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registering or gathering a metric failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    /// The text encoder produced invalid UTF-8.
    #[error("metrics output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
    /// The HTTP exporter failed.
    #[cfg(feature = "metrics")]
    #[error("metrics server error: {0}")]
    Server(#[from] super::ServerError),
}

/// A snapshot of generator state for metrics update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful reseeds from the entropy pools.
    pub reseed_count: u64,
    /// Hash-based rekeys performed by the generator.
    pub rekey_count: u64,
    /// Blocks produced so far (equals the generator counter).
    pub blocks_generated: u64,
    /// Bytes generated since the last rekey.
    pub bytes_since_rekey: u64,
    /// Bytes currently buffered across all pools.
    pub pool_size_bytes: usize,
    /// Total entropy bytes accepted into the pools.
    pub entropy_bytes_added: u64,
    /// Total entropy bytes rejected by the per-pool cap.
    pub entropy_bytes_dropped: u64,
}

/// Prometheus metrics registry for generator monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // Generator metrics
    reseed_total: IntCounter,
    rekey_total: IntCounter,
    blocks_generated: IntGauge,
    bytes_since_rekey: IntGauge,

    // Pool metrics
    pool_size_bytes: IntGauge,
    entropy_bytes_added_total: IntCounter,
    entropy_bytes_dropped_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all generator metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let reseed_total = IntCounter::new(
            "fortuna_reseed_total",
            "Total number of reseeds from the entropy pools",
        )?;
        let rekey_total = IntCounter::new(
            "fortuna_rekey_total",
            "Total number of hash-based generator rekeys",
        )?;
        let blocks_generated = IntGauge::new(
            "fortuna_blocks_generated",
            "Blocks produced by the generator (counter value)",
        )?;
        let bytes_since_rekey = IntGauge::new(
            "fortuna_bytes_since_rekey",
            "Bytes generated under the current key",
        )?;

        let pool_size_bytes = IntGauge::new(
            "fortuna_pool_size_bytes",
            "Bytes currently buffered across all entropy pools",
        )?;
        let entropy_bytes_added_total = IntCounter::new(
            "fortuna_entropy_bytes_added_total",
            "Total entropy bytes accepted into the pools",
        )?;
        let entropy_bytes_dropped_total = IntCounter::new(
            "fortuna_entropy_bytes_dropped_total",
            "Total entropy bytes dropped by the per-pool cap",
        )?;

        registry.register(Box::new(reseed_total.clone()))?;
        registry.register(Box::new(rekey_total.clone()))?;
        registry.register(Box::new(blocks_generated.clone()))?;
        registry.register(Box::new(bytes_since_rekey.clone()))?;
        registry.register(Box::new(pool_size_bytes.clone()))?;
        registry.register(Box::new(entropy_bytes_added_total.clone()))?;
        registry.register(Box::new(entropy_bytes_dropped_total.clone()))?;

        Ok(Self {
            registry,
            reseed_total,
            rekey_total,
            blocks_generated,
            bytes_since_rekey,
            pool_size_bytes,
            entropy_bytes_added_total,
            entropy_bytes_dropped_total,
        })
    }

    /// Updates all metrics from a snapshot of generator state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        // Counters only move forward; increment by the difference.
        advance(&self.reseed_total, snapshot.reseed_count);
        advance(&self.rekey_total, snapshot.rekey_count);
        advance(&self.entropy_bytes_added_total, snapshot.entropy_bytes_added);
        advance(&self.entropy_bytes_dropped_total, snapshot.entropy_bytes_dropped);

        self.blocks_generated
            .set(i64::try_from(snapshot.blocks_generated).unwrap_or(i64::MAX));
        self.bytes_since_rekey
            .set(i64::try_from(snapshot.bytes_since_rekey).unwrap_or(i64::MAX));
        self.pool_size_bytes
            .set(i64::try_from(snapshot.pool_size_bytes).unwrap_or(i64::MAX));

        tracing::trace!(?snapshot, "Metrics updated");
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}
