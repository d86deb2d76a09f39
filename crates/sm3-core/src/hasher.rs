//! One-shot and incremental SM3 hashing.

use gm_words::store_be_words;

use crate::compress::compress;
use crate::consts::{BLOCK_SIZE, DIGEST_SIZE, IV};
use crate::padding::{pad, zero_fill_len};
use crate::Digest;

fn serialize(state: &[u32; 8]) -> Digest {
    let mut out = [0u8; DIGEST_SIZE];
    store_be_words(state, &mut out);
    out
}

/// Hashes `message` in one call.
pub fn digest(message: &[u8]) -> Digest {
    let padded = pad(message);
    let mut state = IV;
    for block in padded.chunks_exact(BLOCK_SIZE) {
        let block: &[u8; BLOCK_SIZE] = block.try_into().expect("chunk length is 64");
        compress(&mut state, block);
    }
    serialize(&state)
}

/// Incremental SM3 hasher.
///
/// Produces the same digest as [`digest`] over the concatenation of every
/// slice passed to [`Sm3::update`], however the input is split.
#[derive(Clone, Debug)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    total_len: u64,
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm3 {
    /// Creates a hasher at the standard initial value.
    pub fn new() -> Self {
        Self {
            state: IV,
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            total_len: 0,
        }
    }

    /// Absorbs `data`.
    pub fn update(&mut self, mut data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffer_len > 0 {
            let take = (BLOCK_SIZE - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];
            if self.buffer_len < BLOCK_SIZE {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            let block: &[u8; BLOCK_SIZE] = block.try_into().expect("chunk length is 64");
            compress(&mut self.state, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Pads the buffered tail and returns the digest.
    pub fn finalize(mut self) -> Digest {
        let bit_len = self.total_len.wrapping_mul(8);
        let zeros = zero_fill_len(self.buffer_len);
        let tail_len = self.buffer_len + 1 + zeros + 8;
        let mut tail = [0u8; 2 * BLOCK_SIZE];
        tail[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        tail[self.buffer_len] = 0x80;
        tail[tail_len - 8..tail_len].copy_from_slice(&bit_len.to_be_bytes());

        for block in tail[..tail_len].chunks_exact(BLOCK_SIZE) {
            let block: &[u8; BLOCK_SIZE] = block.try_into().expect("chunk length is 64");
            compress(&mut self.state, block);
        }
        serialize(&self.state)
    }

    /// Returns the hasher to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abc_matches_standard() {
        assert_eq!(
            hex(&digest(b"abc")),
            "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0"
        );
    }

    #[test]
    fn sixty_four_byte_example_matches_standard() {
        assert_eq!(
            hex(&digest(b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd")),
            "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732"
        );
    }

    #[test]
    fn empty_message() {
        assert_eq!(
            hex(&digest(&[])),
            "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b"
        );
        assert_eq!(Sm3::new().finalize(), digest(&[]));
    }

    #[test]
    fn incremental_byte_by_byte() {
        let msg = [0x61u8; 1000];
        let mut hasher = Sm3::default();
        for byte in msg.iter() {
            hasher.update(core::slice::from_ref(byte));
        }
        assert_eq!(hasher.finalize(), digest(&msg));
    }

    #[test]
    fn reset_discards_input() {
        let mut hasher = Sm3::new();
        hasher.update(b"discarded");
        hasher.reset();
        hasher.update(b"abc");
        assert_eq!(hasher.finalize(), digest(b"abc"));
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
