//! Deterministic block generation in counter mode.
//!
//! The generator encrypts successive counter values under a 32-byte key and
//! periodically replaces that key with a hash of itself, bounding how much
//! output any single key ever produces.

mod counter;
mod drbg;

pub use counter::{decode_counter_block, encode_counter_block};
pub use drbg::{Generator, GeneratorConfig, DEFAULT_REKEY_THRESHOLD};
