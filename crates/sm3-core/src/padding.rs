//! Merkle–Damgård strengthening for SM3.

use crate::consts::BLOCK_SIZE;

/// Offset within the final block where the 64-bit length field starts.
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Number of zero bytes between the `0x80` marker and the length field.
pub(crate) fn zero_fill_len(message_len: usize) -> usize {
    (LENGTH_OFFSET + BLOCK_SIZE - (message_len + 1) % BLOCK_SIZE) % BLOCK_SIZE
}

/// Pads `message` to a multiple of 64 bytes.
///
/// Appends `0x80`, then zeros until the length is 56 mod 64, then the
/// message length in bits as a big-endian `u64`.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let zeros = zero_fill_len(message.len());
    let bit_len = (message.len() as u64).wrapping_mul(8);

    let mut padded = Vec::with_capacity(message.len() + 1 + zeros + 8);
    padded.extend_from_slice(message);
    padded.push(0x80);
    padded.resize(padded.len() + zeros, 0);
    padded.extend_from_slice(&bit_len.to_be_bytes());
    padded
}
