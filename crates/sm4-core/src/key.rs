//! Key types for SM4.

use crate::error::Sm4Error;

/// SM4 key size in bytes.
pub const KEY_SIZE: usize = 16;

/// SM4 master key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm4Key(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for Sm4Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Sm4Key {
    type Error = Sm4Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value
            .try_into()
            .map_err(|_| Sm4Error::InvalidKeyLength { len: value.len() })?;
        Ok(Self(bytes))
    }
}

/// The 32 round keys of an SM4 schedule, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [u32; 32]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..32).
    #[inline]
    pub fn get(&self, round: usize) -> u32 {
        self.0[round]
    }

    /// Iterates the round keys in application order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &u32> + '_ {
        self.0.iter()
    }

    /// Returns the schedule walked backwards, i.e. the decryption schedule.
    pub fn reversed(&self) -> Self {
        let mut keys = self.0;
        keys.reverse();
        Self(keys)
    }
}
