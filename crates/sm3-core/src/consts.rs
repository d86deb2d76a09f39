//! SM3 constants.

/// Message block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Initial chaining value.
pub const IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

/// Round constant T_j for rounds 0..16.
pub(crate) const T_LOW: u32 = 0x79cc4519;

/// Round constant T_j for rounds 16..64.
pub(crate) const T_HIGH: u32 = 0x7a879d8a;
