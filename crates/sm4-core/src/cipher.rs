//! SM4 key schedule and block encryption/decryption.

use gm_words::{load_be_words, store_be_words};

use crate::block::Block;
use crate::key::{RoundKeys, Sm4Key};
use crate::round::{key_transform, round_transform};
use crate::sbox::{CK, FK};

/// Expands a 128-bit key into 32 round keys.
pub fn expand_key(key: &Sm4Key) -> RoundKeys {
    let mut k = [0u32; 4];
    load_be_words(&key.0, &mut k);
    for (word, fk) in k.iter_mut().zip(FK.iter()) {
        *word ^= fk;
    }

    let mut round_keys = [0u32; 32];
    for (i, rk) in round_keys.iter_mut().enumerate() {
        let next = k[0] ^ key_transform(k[1] ^ k[2] ^ k[3] ^ CK[i]);
        k = [k[1], k[2], k[3], next];
        *rk = next;
    }

    RoundKeys(round_keys)
}

/// Runs the 32 rounds over `block`, consuming round keys in iterator order.
fn crypt<'a>(block: &Block, round_keys: impl Iterator<Item = &'a u32>) -> Block {
    let mut x = [0u32; 4];
    load_be_words(block, &mut x);

    for rk in round_keys {
        let next = x[0] ^ round_transform(x[1] ^ x[2] ^ x[3] ^ rk);
        x = [x[1], x[2], x[3], next];
    }

    // Reverse transform R: output the final four words in reverse order.
    x.reverse();
    let mut out = [0u8; 16];
    store_be_words(&x, &mut out);
    out
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    crypt(block, round_keys.iter())
}

/// Decrypts a single 16-byte block, walking the encryption schedule backwards.
///
/// Equivalent to `encrypt_block(block, &round_keys.reversed())`.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    crypt(block, round_keys.iter().rev())
}
