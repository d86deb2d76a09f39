//! Word-level helpers shared by the SM3 hash and the SM4 block cipher.
//!
//! Both primitives view their input as big-endian 32-bit words and mix them
//! with left rotations. Everything here is a total function; slice length
//! mismatches are programming errors and are only checked in debug builds.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Rotates `word` left by `n` bits. `n` is taken modulo 32.
#[inline]
pub fn rotl(word: u32, n: u32) -> u32 {
    word.rotate_left(n)
}

/// Packs four big-endian bytes into a word.
#[inline]
pub fn pack_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Unpacks a word into four big-endian bytes.
#[inline]
pub fn unpack_be(word: u32) -> [u8; 4] {
    word.to_be_bytes()
}

/// Fills `words` from `bytes`, four big-endian bytes per word.
#[inline]
pub fn load_be_words(bytes: &[u8], words: &mut [u32]) {
    debug_assert_eq!(bytes.len(), words.len() * 4);
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = pack_be([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

/// Writes `words` into `bytes`, four big-endian bytes per word.
#[inline]
pub fn store_be_words(words: &[u32], bytes: &mut [u8]) {
    debug_assert_eq!(bytes.len(), words.len() * 4);
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&unpack_be(*word));
    }
}

/// XORs `rhs` into `dst` byte by byte.
#[inline]
pub fn xor_in_place(dst: &mut [u8], rhs: &[u8]) {
    debug_assert_eq!(dst.len(), rhs.len());
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
