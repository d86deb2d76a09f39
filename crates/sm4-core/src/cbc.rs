//! Cipher Block Chaining mode with padding.
//!
//! Each plaintext block is XORed with the previous ciphertext block (the IV
//! for the first block) before encryption. The chain value is threaded
//! through the block loop as an explicit accumulator and is always taken
//! from the ciphertext side, in both directions.

use gm_words::xor_in_place;

use crate::block::{to_block, Block, BLOCK_SIZE};
use crate::cipher::{decrypt_block, encrypt_block, expand_key};
use crate::error::Sm4Error;
use crate::key::{RoundKeys, Sm4Key};
use crate::padding::{pad, unpad, PaddingPolicy};

/// Configuration for CBC processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CbcConfig {
    /// How decryption treats an out-of-range trailing pad byte.
    pub padding: PaddingPolicy,
}

/// SM4-CBC context bound to one key and IV.
#[derive(Clone, Debug)]
pub struct Cbc {
    round_keys: RoundKeys,
    iv: Block,
    config: CbcConfig,
}

impl Cbc {
    /// Creates a context with the default (strict) configuration.
    pub fn new(key: &Sm4Key, iv: Block) -> Self {
        Self::with_config(key, iv, CbcConfig::default())
    }

    /// Creates a context with explicit configuration.
    pub fn with_config(key: &Sm4Key, iv: Block, config: CbcConfig) -> Self {
        Self {
            round_keys: expand_key(key),
            iv,
            config,
        }
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut CbcConfig {
        &mut self.config
    }

    /// Pads and encrypts `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        cbc_encrypt(plaintext, &self.round_keys, &self.iv)
    }

    /// Decrypts `ciphertext` and removes padding per the configured policy.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Sm4Error> {
        decrypt_with_policy(ciphertext, &self.round_keys, &self.iv, self.config.padding)
    }
}

/// Pads `plaintext` and encrypts it in CBC mode.
///
/// The output length is the padded length: always a non-zero multiple of 16.
pub fn cbc_encrypt(plaintext: &[u8], round_keys: &RoundKeys, iv: &Block) -> Vec<u8> {
    chain_encrypt(&pad(plaintext), round_keys, iv)
}

/// Decrypts CBC `ciphertext` and strictly removes its padding.
///
/// Fails with [`Sm4Error::InvalidLength`] unless the input is a non-zero
/// multiple of 16 bytes, and with [`Sm4Error::InvalidPadding`] when the
/// recovered trailing byte is not a valid pad length.
pub fn cbc_decrypt(
    ciphertext: &[u8],
    round_keys: &RoundKeys,
    iv: &Block,
) -> Result<Vec<u8>, Sm4Error> {
    decrypt_with_policy(ciphertext, round_keys, iv, PaddingPolicy::Strict)
}

fn decrypt_with_policy(
    ciphertext: &[u8],
    round_keys: &RoundKeys,
    iv: &Block,
    policy: PaddingPolicy,
) -> Result<Vec<u8>, Sm4Error> {
    let mut plaintext = chain_decrypt(ciphertext, round_keys, iv)?;
    let keep = unpad(&plaintext, policy)?.len();
    plaintext.truncate(keep);
    Ok(plaintext)
}

fn chain_encrypt(padded: &[u8], round_keys: &RoundKeys, iv: &Block) -> Vec<u8> {
    debug_assert_eq!(padded.len() % BLOCK_SIZE, 0);
    let mut out = Vec::with_capacity(padded.len());
    padded.chunks_exact(BLOCK_SIZE).fold(*iv, |chain, chunk| {
        let mut block = to_block(chunk);
        xor_in_place(&mut block, &chain);
        let ct = encrypt_block(&block, round_keys);
        out.extend_from_slice(&ct);
        ct
    });
    out
}

fn chain_decrypt(
    ciphertext: &[u8],
    round_keys: &RoundKeys,
    iv: &Block,
) -> Result<Vec<u8>, Sm4Error> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Sm4Error::InvalidLength {
            len: ciphertext.len(),
        });
    }
    let mut out = Vec::with_capacity(ciphertext.len());
    ciphertext.chunks_exact(BLOCK_SIZE).fold(*iv, |chain, chunk| {
        let ct = to_block(chunk);
        let mut pt = decrypt_block(&ct, round_keys);
        xor_in_place(&mut pt, &chain);
        out.extend_from_slice(&pt);
        ct
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore};

    const STD_KEY: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];
    const COUNTING_IV: Block = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    fn std_keys() -> RoundKeys {
        expand_key(&Sm4Key::from(STD_KEY))
    }

    #[test]
    fn empty_plaintext_is_one_pad_block() {
        let ct = cbc_encrypt(&[], &std_keys(), &COUNTING_IV);
        assert_eq!(
            ct,
            [
                0x4b, 0x91, 0x06, 0x51, 0x75, 0x4b, 0x55, 0x53, 0xf1, 0x0c, 0xfa, 0x0c, 0x8a, 0x09,
                0xe9, 0xe5
            ]
        );
        assert_eq!(cbc_decrypt(&ct, &std_keys(), &COUNTING_IV), Ok(Vec::new()));
    }

    #[test]
    fn first_block_is_block_cipher_of_plaintext_xor_iv() {
        let rks = std_keys();
        let ct = cbc_encrypt(&STD_KEY, &rks, &[0u8; 16]);
        assert_eq!(ct.len(), 32);
        assert_eq!(ct[..16], encrypt_block(&STD_KEY, &rks));
    }

    #[test]
    fn aligned_plaintext_gains_full_pad_block() {
        let rks = std_keys();
        let ct = cbc_encrypt(&[0x33; 32], &rks, &COUNTING_IV);
        assert_eq!(ct.len(), 48);
        let raw = chain_decrypt(&ct, &rks, &COUNTING_IV).expect("aligned");
        assert_eq!(&raw[32..], &[16u8; 16]);
    }

    #[test]
    fn chain_state_is_ciphertext_side() {
        let rks = std_keys();
        let pt = [0x5cu8; 64];
        let mut ct = cbc_encrypt(&pt, &rks, &COUNTING_IV);
        ct[20] ^= 0x01;
        let raw = chain_decrypt(&ct, &rks, &COUNTING_IV).expect("aligned");
        // Block 1 is garbled, block 2 has exactly the flipped bit, the rest recover.
        assert_eq!(raw[..16], pt[..16]);
        assert_ne!(raw[16..32], pt[16..32]);
        assert_eq!(raw[32 + 4], pt[32 + 4] ^ 0x01);
        assert_eq!(raw[48..64], pt[48..64]);
    }

    #[test]
    fn rejects_unaligned_or_empty_ciphertext() {
        let rks = std_keys();
        assert_eq!(
            cbc_decrypt(&[0u8; 31], &rks, &COUNTING_IV),
            Err(Sm4Error::InvalidLength { len: 31 })
        );
        assert_eq!(
            cbc_decrypt(&[], &rks, &COUNTING_IV),
            Err(Sm4Error::InvalidLength { len: 0 })
        );
    }

    #[test]
    fn padding_policy_controls_corrupt_tail() {
        let key = Sm4Key::from(STD_KEY);
        let unpadded = [0xffu8; 16];
        let ct = chain_encrypt(&unpadded, &expand_key(&key), &COUNTING_IV);

        let strict = Cbc::new(&key, COUNTING_IV);
        assert_eq!(
            strict.decrypt(&ct),
            Err(Sm4Error::InvalidPadding { byte: 0xff })
        );

        let mut lenient = strict.clone();
        lenient.config_mut().padding = PaddingPolicy::Lenient;
        assert_eq!(lenient.decrypt(&ct), Ok(unpadded.to_vec()));
    }

    #[test]
    fn round_trip_random_lengths() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let mut key = [0u8; 16];
            let mut iv = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut iv);
            let mut pt = vec![0u8; rng.gen_range(0..200)];
            rng.fill_bytes(&mut pt);

            let cbc = Cbc::new(&Sm4Key::from(key), iv);
            let ct = cbc.encrypt(&pt);
            assert_eq!(ct.len(), (pt.len() / 16 + 1) * 16);
            assert_eq!(cbc.decrypt(&ct), Ok(pt));
        }
    }
}
