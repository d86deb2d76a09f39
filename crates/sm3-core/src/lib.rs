//! SM3 (GB/T 32905-2016) cryptographic hash function.
//!
//! The crate exposes the building blocks individually (padding, message
//! expansion, compression) alongside a one-shot [`digest`] and an
//! incremental [`Sm3`] hasher. All operations are total.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compress;
mod consts;
mod expand;
mod hasher;
mod padding;

pub use crate::compress::compress;
pub use crate::consts::{BLOCK_SIZE, DIGEST_SIZE, IV};
pub use crate::expand::{expand, MessageSchedule};
pub use crate::hasher::{digest, Sm3};
pub use crate::padding::pad;

/// SM3 digest of 32 bytes.
pub type Digest = [u8; DIGEST_SIZE];
