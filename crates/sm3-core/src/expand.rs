//! SM3 message expansion.

use gm_words::{load_be_words, rotl};

/// Permutation P1 used by the message expansion.
#[inline]
pub(crate) fn p1(x: u32) -> u32 {
    x ^ rotl(x, 15) ^ rotl(x, 23)
}

/// The 132 words derived from one 64-byte block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageSchedule {
    /// W_0..W_67: the block's sixteen words followed by 52 expanded words.
    pub w: [u32; 68],
    /// W'_0..W'_63 with `W'_j = W_j ^ W_{j+4}`.
    pub w1: [u32; 64],
}

/// Expands one message block into its schedule.
pub fn expand(block: &[u8; 64]) -> MessageSchedule {
    let mut w = [0u32; 68];
    load_be_words(block, &mut w[..16]);
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ rotl(w[j - 3], 15)) ^ rotl(w[j - 13], 7) ^ w[j - 6];
    }
    let w1 = core::array::from_fn(|j| w[j] ^ w[j + 4]);
    MessageSchedule { w, w1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::pad;

    #[test]
    fn abc_schedule_matches_standard_example() {
        let padded = pad(b"abc");
        let block: [u8; 64] = padded[..].try_into().expect("one block");
        let schedule = expand(&block);
        assert_eq!(schedule.w[0], 0x6162_6380);
        assert_eq!(schedule.w[15], 0x0000_0018);
        assert_eq!(schedule.w[16], 0x9092_e200);
        assert_eq!(schedule.w[67], 0xb99c_0545);
        assert_eq!(schedule.w1[0], schedule.w[0] ^ schedule.w[4]);
        assert_eq!(schedule.w1[63], 0x49e2_60d5);
    }

    #[test]
    fn p1_known_value() {
        assert_eq!(p1(0), 0);
        assert_eq!(p1(1), 1 ^ (1 << 15) ^ (1 << 23));
    }
}
