use super::{T0, T1};

/// Per-round constants `Tj <<< j`, computed at compile time.
///
/// Rotation amounts of 32 or more wrap, so round 33 uses `T1 <<< 1`.
pub const ROUND_CONSTANTS: [u32; 64] = {
    let mut out = [0u32; 64];
    let mut i = 0;

    while i < 64 {
        let base = if i < 16 { T0 } else { T1 };
        out[i] = base.rotate_left(i as u32);
        i += 1;
    }

    out
};

#[inline(always)]
pub fn ff0(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
pub fn ff1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
pub fn gg0(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
pub fn gg1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

/// Permutation applied to the register chain.
#[inline(always)]
pub fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

/// Permutation used by message expansion.
#[inline(always)]
pub fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// Expands 16 message words into the 68-word schedule.
///
/// Round `j` consumes `w[j]` and `w[j] ^ w[j + 4]`, so no separate
/// `W'` array is kept.
#[inline(always)]
pub fn expand(block: [u32; 16]) -> [u32; 68] {
    let mut w = [0u32; 68];
    w[..16].copy_from_slice(&block);

    for i in 16..68 {
        w[i] = p1(w[i - 16] ^ w[i - 9] ^ w[i - 3].rotate_left(15))
            ^ w[i - 13].rotate_left(7)
            ^ w[i - 6];
    }

    w
}

#[cfg(not(feature = "speed"))]
pub fn all_rounds(state: &mut [u32; 8], w: &[u32; 68]) {
    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];
    let mut e = state[4];
    let mut f = state[5];
    let mut g = state[6];
    let mut h = state[7];

    for i in 0..64 {
        let a12 = a.rotate_left(12);
        let ss1 = a12
            .wrapping_add(e)
            .wrapping_add(ROUND_CONSTANTS[i])
            .rotate_left(7);
        let ss2 = ss1 ^ a12;

        let (ff, gg) = if i < 16 {
            (ff0(a, b, c), gg0(e, f, g))
        } else {
            (ff1(a, b, c), gg1(e, f, g))
        };

        let tt1 = ff
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w[i] ^ w[i + 4]);
        let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[i]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    state[0] ^= a;
    state[1] ^= b;
    state[2] ^= c;
    state[3] ^= d;
    state[4] ^= e;
    state[5] ^= f;
    state[6] ^= g;
    state[7] ^= h;
}

#[cfg(feature = "speed")]
pub fn all_rounds(state: &mut [u32; 8], w: &[u32; 68]) {
    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];
    let mut e = state[4];
    let mut f = state[5];
    let mut g = state[6];
    let mut h = state[7];

    macro_rules! R {
        ($i:expr, $ff:ident, $gg:ident) => {{
            let a12 = a.rotate_left(12);
            let ss1 = a12
                .wrapping_add(e)
                .wrapping_add(ROUND_CONSTANTS[$i])
                .rotate_left(7);
            let ss2 = ss1 ^ a12;

            let tt1 = $ff(a, b, c)
                .wrapping_add(d)
                .wrapping_add(ss2)
                .wrapping_add(w[$i] ^ w[$i + 4]);
            let tt2 = $gg(e, f, g)
                .wrapping_add(h)
                .wrapping_add(ss1)
                .wrapping_add(w[$i]);

            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }};
    }

    R!(0, ff0, gg0);
    R!(1, ff0, gg0);
    R!(2, ff0, gg0);
    R!(3, ff0, gg0);
    R!(4, ff0, gg0);
    R!(5, ff0, gg0);
    R!(6, ff0, gg0);
    R!(7, ff0, gg0);
    R!(8, ff0, gg0);
    R!(9, ff0, gg0);
    R!(10, ff0, gg0);
    R!(11, ff0, gg0);
    R!(12, ff0, gg0);
    R!(13, ff0, gg0);
    R!(14, ff0, gg0);
    R!(15, ff0, gg0);

    R!(16, ff1, gg1);
    R!(17, ff1, gg1);
    R!(18, ff1, gg1);
    R!(19, ff1, gg1);
    R!(20, ff1, gg1);
    R!(21, ff1, gg1);
    R!(22, ff1, gg1);
    R!(23, ff1, gg1);
    R!(24, ff1, gg1);
    R!(25, ff1, gg1);
    R!(26, ff1, gg1);
    R!(27, ff1, gg1);
    R!(28, ff1, gg1);
    R!(29, ff1, gg1);
    R!(30, ff1, gg1);
    R!(31, ff1, gg1);
    R!(32, ff1, gg1);
    R!(33, ff1, gg1);
    R!(34, ff1, gg1);
    R!(35, ff1, gg1);
    R!(36, ff1, gg1);
    R!(37, ff1, gg1);
    R!(38, ff1, gg1);
    R!(39, ff1, gg1);
    R!(40, ff1, gg1);
    R!(41, ff1, gg1);
    R!(42, ff1, gg1);
    R!(43, ff1, gg1);
    R!(44, ff1, gg1);
    R!(45, ff1, gg1);
    R!(46, ff1, gg1);
    R!(47, ff1, gg1);
    R!(48, ff1, gg1);
    R!(49, ff1, gg1);
    R!(50, ff1, gg1);
    R!(51, ff1, gg1);
    R!(52, ff1, gg1);
    R!(53, ff1, gg1);
    R!(54, ff1, gg1);
    R!(55, ff1, gg1);
    R!(56, ff1, gg1);
    R!(57, ff1, gg1);
    R!(58, ff1, gg1);
    R!(59, ff1, gg1);
    R!(60, ff1, gg1);
    R!(61, ff1, gg1);
    R!(62, ff1, gg1);
    R!(63, ff1, gg1);

    state[0] ^= a;
    state[1] ^= b;
    state[2] ^= c;
    state[3] ^= d;
    state[4] ^= e;
    state[5] ^= f;
    state[6] ^= g;
    state[7] ^= h;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_constants_wrap_rotation() {
        assert_eq!(ROUND_CONSTANTS[0], T0);
        assert_eq!(ROUND_CONSTANTS[16], T1.rotate_left(16));
        assert_eq!(ROUND_CONSTANTS[33], T1.rotate_left(1));
        assert_eq!(ROUND_CONSTANTS[63], T1.rotate_left(31));
    }

    #[test]
    fn boolean_functions_differ_after_round_15() {
        let (x, y, z) = (0xf0f0_f0f0, 0xff00_ff00, 0x0f0f_0f0f);

        assert_eq!(ff0(x, y, z), gg0(x, y, z));
        assert_eq!(ff1(x, y, z), 0xff00_ff00);
        assert_eq!(gg1(x, y, z), 0xff0f_ff0f);
        assert_ne!(ff1(x, y, z), gg1(x, y, z));
    }

    #[test]
    fn permutations_fix_zero_and_all_ones() {
        assert_eq!(p0(0), 0);
        assert_eq!(p1(0), 0);
        assert_eq!(p0(u32::MAX), u32::MAX);
        assert_eq!(p1(u32::MAX), u32::MAX);
    }
}
