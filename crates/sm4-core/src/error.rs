//! Error type for SM4 mode and padding operations.

use thiserror::Error;

/// Errors raised on malformed caller input.
///
/// The block transform itself is total; only the variable-length surfaces
/// (modes, unpadding, key parsing) can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sm4Error {
    /// Input is empty or not a multiple of the block size.
    #[error("input length {len} is not a non-zero multiple of 16 bytes")]
    InvalidLength {
        /// Offending length in bytes.
        len: usize,
    },
    /// Trailing pad byte is outside 1..=16 or longer than the buffer.
    #[error("invalid padding byte 0x{byte:02x}")]
    InvalidPadding {
        /// The trailing byte that was read as the pad length.
        byte: u8,
    },
    /// Key material is not exactly 16 bytes.
    #[error("SM4 key must be 16 bytes, got {len}")]
    InvalidKeyLength {
        /// Offending length in bytes.
        len: usize,
    },
}
