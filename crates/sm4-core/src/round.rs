//! SM4 round and key-mixing transformations.

use gm_words::rotl;

use crate::sbox::sbox;

/// Non-linear substitution τ: the S-box applied to each byte of a big-endian word.
#[inline]
pub fn tau(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_be_bytes();
    u32::from_be_bytes([sbox(b0), sbox(b1), sbox(b2), sbox(b3)])
}

/// Linear diffusion L used by the encryption rounds.
#[inline]
fn linear(b: u32) -> u32 {
    b ^ rotl(b, 2) ^ rotl(b, 10) ^ rotl(b, 18) ^ rotl(b, 24)
}

/// Linear diffusion L' used by the key schedule.
#[inline]
fn linear_key(b: u32) -> u32 {
    b ^ rotl(b, 13) ^ rotl(b, 23)
}

/// Round transform T = L ∘ τ.
#[inline]
pub fn round_transform(word: u32) -> u32 {
    linear(tau(word))
}

/// Key-mixing transform T' = L' ∘ τ.
#[inline]
pub fn key_transform(word: u32) -> u32 {
    linear_key(tau(word))
}
