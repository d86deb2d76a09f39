//! Independent per-block encryption over block-aligned buffers.
//!
//! No chaining and no padding: identical plaintext blocks map to identical
//! ciphertext blocks. Useful as a bulk primitive and for test vectors.

use crate::block::{to_block, BLOCK_SIZE};
use crate::cipher::{decrypt_block, encrypt_block};
use crate::error::Sm4Error;
use crate::key::RoundKeys;

fn check_aligned(data: &[u8]) -> Result<(), Sm4Error> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(Sm4Error::InvalidLength { len: data.len() });
    }
    Ok(())
}

/// Encrypts every 16-byte block of `data` independently.
pub fn ecb_encrypt(data: &[u8], round_keys: &RoundKeys) -> Result<Vec<u8>, Sm4Error> {
    check_aligned(data)?;
    Ok(data
        .chunks_exact(BLOCK_SIZE)
        .flat_map(|chunk| encrypt_block(&to_block(chunk), round_keys))
        .collect())
}

/// Decrypts every 16-byte block of `data` independently.
pub fn ecb_decrypt(data: &[u8], round_keys: &RoundKeys) -> Result<Vec<u8>, Sm4Error> {
    check_aligned(data)?;
    Ok(data
        .chunks_exact(BLOCK_SIZE)
        .flat_map(|chunk| decrypt_block(&to_block(chunk), round_keys))
        .collect())
}
