//! Fortuna CSPRNG
//!
//! A cryptographically secure pseudorandom number generator built on the
//! Fortuna construction, with persistent seeding so output is
//! unpredictable even immediately after process start.
//!
//! # Architecture
//!
//! ```text
//! add_entropy → accumulator (32 pools) ──reseed──► generator key
//!                                          │
//!                                          └──────► seed store
//! random_bytes ◄── generator (AES-256 over counter, hash rekey)
//! ```
//!
//! # Design Principles
//!
//! - **Injected collaborators**: hash, cipher and seed store are traits, so
//!   instances are independent and deterministic under test
//! - **Typed failures**: primitive, storage and randomness errors are
//!   returned to the caller, never replaced with weak output
//! - **Uses standard primitives**: SHA-256 (or BLAKE3) and AES-256
//!
//! # Example
//!
//! ```no_run
//! use fortuna::{Fortuna, FileSeedStore};
//!
//! let mut rng = Fortuna::open(FileSeedStore::new("seed.dat")).unwrap();
//!
//! rng.add_entropy(&[0x01, 0x02, 0x03, 0x04], 0);
//! rng.reseed().unwrap();
//!
//! let bytes = rng.random_bytes(32).unwrap();
//! assert_eq!(bytes.len(), 32);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod accumulator;
pub mod config;
pub mod error;
pub mod fortuna;
pub mod generator;
pub mod metrics;
pub mod primitives;
pub mod storage;

// Re-export commonly used types at crate root
pub use accumulator::{EntropyAccumulator, PoolConfig, POOL_COUNT};
pub use config::FortunaConfig;
pub use error::FortunaError;
pub use fortuna::{Fortuna, SharedFortuna};
pub use generator::{Generator, GeneratorConfig};
pub use primitives::{Aes256Ctr, BlockCipher, HashAlgorithm, HashFunction};
pub use storage::{FileSeedStore, MemorySeedStore, Seed, SeedStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
