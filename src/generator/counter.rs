//! Counter-block encoding.
//!
//! The 16-byte counter block carries the 64-bit counter big-endian in its
//! low-order eight bytes. The high-order eight bytes are always zero.

use crate::primitives::BLOCK_SIZE;

const COUNTER_OFFSET: usize = BLOCK_SIZE - std::mem::size_of::<u64>();

/// Builds the counter block for `counter`.
pub fn encode_counter_block(counter: u64) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[COUNTER_OFFSET..].copy_from_slice(&counter.to_be_bytes());
    block
}

/// Recovers the counter from a counter block.
///
/// Returns `None` if any high-order byte is non-zero.
pub fn decode_counter_block(block: &[u8; BLOCK_SIZE]) -> Option<u64> {
    let (high, low) = block.split_at(COUNTER_OFFSET);
    if high.iter().any(|&b| b != 0) {
        return None;
    }
    let low: [u8; 8] = low.try_into().ok()?;
    Some(u64::from_be_bytes(low))
}
