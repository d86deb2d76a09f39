//! Block padding for SM4 modes.
//!
//! Padding always adds between 1 and 16 bytes, each equal to the number of
//! bytes added, so a block-aligned input gains a full block of `0x10`.
//! Only the trailing byte is interpreted when removing padding.

use crate::block::BLOCK_SIZE;
use crate::error::Sm4Error;

/// How [`unpad`] treats a trailing byte that cannot be a pad length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingPolicy {
    /// Reject out-of-range padding with [`Sm4Error::InvalidPadding`].
    #[default]
    Strict,
    /// Return the buffer untouched when the trailing byte is out of range.
    ///
    /// Matches legacy peers that never signal padding errors. A corrupted
    /// ciphertext then decrypts to plaintext with a garbage tail instead of
    /// failing, so only use this when interoperating with such peers.
    Lenient,
}

/// Number of pad bytes appended to a message of `len` bytes.
#[inline]
pub fn pad_len(len: usize) -> usize {
    BLOCK_SIZE - len % BLOCK_SIZE
}

/// Returns `data` followed by its padding.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let n = pad_len(data.len());
    let mut padded = Vec::with_capacity(data.len() + n);
    padded.extend_from_slice(data);
    padded.resize(data.len() + n, n as u8);
    padded
}

/// Strips padding from `data`, returning the unpadded prefix.
pub fn unpad(data: &[u8], policy: PaddingPolicy) -> Result<&[u8], Sm4Error> {
    let Some(&last) = data.last() else {
        return match policy {
            PaddingPolicy::Strict => Err(Sm4Error::InvalidLength { len: 0 }),
            PaddingPolicy::Lenient => Ok(data),
        };
    };

    let n = last as usize;
    if (1..=BLOCK_SIZE).contains(&n) && n <= data.len() {
        return Ok(&data[..data.len() - n]);
    }

    match policy {
        PaddingPolicy::Strict => Err(Sm4Error::InvalidPadding { byte: last }),
        // Explicit pass-through: the buffer is treated as never padded.
        PaddingPolicy::Lenient => Ok(data),
    }
}
