//! Block representation helpers.

/// SM4 block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// SM4 block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// Copies a 16-byte chunk into an owned block.
#[inline]
pub(crate) fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}
