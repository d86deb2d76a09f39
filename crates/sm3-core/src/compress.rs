//! SM3 compression function.

use gm_words::rotl;

use crate::consts::{T_HIGH, T_LOW};
use crate::expand::{expand, MessageSchedule};

/// Permutation P0 applied to TT2 each round.
#[inline]
fn p0(x: u32) -> u32 {
    x ^ rotl(x, 9) ^ rotl(x, 17)
}

#[inline]
fn ff(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline]
fn gg(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

#[inline]
fn t(j: usize) -> u32 {
    if j < 16 {
        T_LOW
    } else {
        T_HIGH
    }
}

/// Folds one 64-byte block into `state`.
///
/// The eight working registers run 64 rounds and are then XORed into the
/// incoming state; the state is never replaced outright.
pub fn compress(state: &mut [u32; 8], block: &[u8; 64]) {
    let MessageSchedule { w, w1 } = expand(block);
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let a12 = rotl(a, 12);
        let ss1 = rotl(a12.wrapping_add(e).wrapping_add(rotl(t(j), j as u32)), 7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff(j, a, b, c)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w1[j]);
        let tt2 = gg(j, e, f, g)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(w[j]);
        d = c;
        c = rotl(b, 9);
        b = a;
        a = tt1;
        h = g;
        g = rotl(f, 19);
        f = e;
        e = p0(tt2);
    }

    for (v, r) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *v ^= r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::IV;
    use crate::padding::pad;

    #[test]
    fn abc_single_compression() {
        let padded = pad(b"abc");
        let block: [u8; 64] = padded[..].try_into().expect("one block");
        let mut state = IV;
        compress(&mut state, &block);
        assert_eq!(
            state,
            [
                0x66c7f0f4, 0x62eeedd9, 0xd1f2d46b, 0xdc10e4e2, 0x4167c487, 0x5cf2f7a2, 0x297da02b,
                0x8f4ba8e0
            ]
        );
    }

    #[test]
    fn boolean_functions_switch_at_round_16() {
        let (x, y, z) = (0xff00_ff00, 0xf0f0_f0f0, 0xcccc_cccc);
        assert_eq!(ff(15, x, y, z), x ^ y ^ z);
        assert_eq!(gg(15, x, y, z), x ^ y ^ z);
        assert_eq!(ff(16, x, y, z), 0xfcc0_fcc0);
        assert_eq!(gg(16, x, y, z), 0xf0cc_f0cc);
        assert_eq!(t(15), T_LOW);
        assert_eq!(t(16), T_HIGH);
    }

    #[test]
    fn compression_feeds_forward() {
        let block = [0u8; 64];
        let mut zero_state = [0u32; 8];
        compress(&mut zero_state, &block);
        let mut iv_state = IV;
        compress(&mut iv_state, &block);
        assert_ne!(zero_state, iv_state);
        assert_ne!(iv_state, IV);
    }
}
