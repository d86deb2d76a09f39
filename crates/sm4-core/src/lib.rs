//! SM4 (GB/T 32907-2016) block cipher.
//!
//! This crate provides:
//! - Key schedule expanding a 128-bit key into 32 round keys.
//! - Single-block encryption and decryption.
//! - ECB helpers over block-aligned buffers.
//! - CBC mode with the 1..=16 byte padding scheme and a configurable unpadding policy.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; the S-box lookups are table driven and not side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cbc;
mod cipher;
mod ecb;
mod error;
mod key;
pub mod padding;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cbc::{cbc_decrypt, cbc_encrypt, Cbc, CbcConfig};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::ecb::{ecb_decrypt, ecb_encrypt};
pub use crate::error::Sm4Error;
pub use crate::key::{RoundKeys, Sm4Key, KEY_SIZE};
pub use crate::padding::PaddingPolicy;
