//! Prometheus metrics exporter for generator monitoring.
//!
//! # Metrics Exposed
//!
//! ## Generator Metrics
//! - `fortuna_reseed_total` - Total reseeds from the entropy pools
//! - `fortuna_rekey_total` - Total hash-based rekeys
//! - `fortuna_blocks_generated` - Blocks produced (the generator counter)
//! - `fortuna_bytes_since_rekey` - Bytes generated under the current key
//!
//! ## Pool Metrics
//! - `fortuna_pool_size_bytes` - Bytes currently buffered across all pools
//! - `fortuna_entropy_bytes_added_total` - Total entropy bytes accepted
//! - `fortuna_entropy_bytes_dropped_total` - Bytes rejected by the pool cap
//!
//! # Example
//!
//! ```no_run
//! use fortuna::{Fortuna, MemorySeedStore};
//! use fortuna::metrics::MetricsRegistry;
//!
//! let mut rng = Fortuna::open(MemorySeedStore::new()).unwrap();
//! rng.random_bytes(64).unwrap();
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! registry.update(&rng.snapshot());
//! println!("{}", registry.encode().unwrap());
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError};
