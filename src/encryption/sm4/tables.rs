//! SM4 constant tables.
//!
//! Every composite table entry folds the S-box lookup, the placement of the
//! byte in its lane and the linear diffusion into one 32-bit word, so the
//! round function is four lookups XORed together. All tables are built at
//! compile time.

/// Substitution box (GB/T 32907-2016, 6.2).
pub const SBOX: [u8; 256] = [
    0xd6, 0x90, 0xe9, 0xfe, 0xcc, 0xe1, 0x3d, 0xb7, 0x16, 0xb6, 0x14, 0xc2, 0x28, 0xfb, 0x2c, 0x05,
    0x2b, 0x67, 0x9a, 0x76, 0x2a, 0xbe, 0x04, 0xc3, 0xaa, 0x44, 0x13, 0x26, 0x49, 0x86, 0x06, 0x99,
    0x9c, 0x42, 0x50, 0xf4, 0x91, 0xef, 0x98, 0x7a, 0x33, 0x54, 0x0b, 0x43, 0xed, 0xcf, 0xac, 0x62,
    0xe4, 0xb3, 0x1c, 0xa9, 0xc9, 0x08, 0xe8, 0x95, 0x80, 0xdf, 0x94, 0xfa, 0x75, 0x8f, 0x3f, 0xa6,
    0x47, 0x07, 0xa7, 0xfc, 0xf3, 0x73, 0x17, 0xba, 0x83, 0x59, 0x3c, 0x19, 0xe6, 0x85, 0x4f, 0xa8,
    0x68, 0x6b, 0x81, 0xb2, 0x71, 0x64, 0xda, 0x8b, 0xf8, 0xeb, 0x0f, 0x4b, 0x70, 0x56, 0x9d, 0x35,
    0x1e, 0x24, 0x0e, 0x5e, 0x63, 0x58, 0xd1, 0xa2, 0x25, 0x22, 0x7c, 0x3b, 0x01, 0x21, 0x78, 0x87,
    0xd4, 0x00, 0x46, 0x57, 0x9f, 0xd3, 0x27, 0x52, 0x4c, 0x36, 0x02, 0xe7, 0xa0, 0xc4, 0xc8, 0x9e,
    0xea, 0xbf, 0x8a, 0xd2, 0x40, 0xc7, 0x38, 0xb5, 0xa3, 0xf7, 0xf2, 0xce, 0xf9, 0x61, 0x15, 0xa1,
    0xe0, 0xae, 0x5d, 0xa4, 0x9b, 0x34, 0x1a, 0x55, 0xad, 0x93, 0x32, 0x30, 0xf5, 0x8c, 0xb1, 0xe3,
    0x1d, 0xf6, 0xe2, 0x2e, 0x82, 0x66, 0xca, 0x60, 0xc0, 0x29, 0x23, 0xab, 0x0d, 0x53, 0x4e, 0x6f,
    0xd5, 0xdb, 0x37, 0x45, 0xde, 0xfd, 0x8e, 0x2f, 0x03, 0xff, 0x6a, 0x72, 0x6d, 0x6c, 0x5b, 0x51,
    0x8d, 0x1b, 0xaf, 0x92, 0xbb, 0xdd, 0xbc, 0x7f, 0x11, 0xd9, 0x5c, 0x41, 0x1f, 0x10, 0x5a, 0xd8,
    0x0a, 0xc1, 0x31, 0x88, 0xa5, 0xcd, 0x7b, 0xbd, 0x2d, 0x74, 0xd0, 0x12, 0xb8, 0xe5, 0xb4, 0xb0,
    0x89, 0x69, 0x97, 0x4a, 0x0c, 0x96, 0x77, 0x7e, 0x65, 0xb9, 0xf1, 0x09, 0xc5, 0x6e, 0xc6, 0x84,
    0x18, 0xf0, 0x7d, 0xec, 0x3a, 0xdc, 0x4d, 0x20, 0x79, 0xee, 0x5f, 0x3e, 0xd7, 0xcb, 0x39, 0x48,
];

/// System parameters XORed into the key before expansion.
pub const FK: [u32; 4] = [0xa3b1_bac6, 0x56aa_3350, 0x677d_9197, 0xb270_22dc];

/// Fixed parameters: byte `j` of `CK[i]` is `(4i + j) · 7 mod 256`.
pub const CK: [u32; 32] = {
    let mut out = [0u32; 32];
    let mut i = 0;

    while i < 32 {
        let mut word = 0u32;
        let mut j = 0;
        while j < 4 {
            word = (word << 8) | (((4 * i + j) * 7) & 0xff) as u32;
            j += 1;
        }

        out[i] = word;
        i += 1;
    }

    out
};

/// Which linear transform a composite table folds in.
#[derive(Clone, Copy)]
enum Diffusion {
    /// `L`, used by the encryption rounds.
    Round,
    /// `L'`, used by the key schedule.
    Key,
}

const fn diffuse(x: u32, kind: Diffusion) -> u32 {
    match kind {
        Diffusion::Round => {
            x ^ x.rotate_left(2) ^ x.rotate_left(10) ^ x.rotate_left(18) ^ x.rotate_left(24)
        }
        Diffusion::Key => x ^ x.rotate_left(13) ^ x.rotate_left(23),
    }
}

/// Builds the four lane tables for one diffusion transform.
///
/// Table `i` handles the byte at bit offset `24 − 8i`.
const fn composite(kind: Diffusion) -> [[u32; 256]; 4] {
    let mut out = [[0u32; 256]; 4];
    let mut lane = 0;

    while lane < 4 {
        let shift = 24 - 8 * lane as u32;
        let mut b = 0;

        while b < 256 {
            out[lane][b] = diffuse((SBOX[b] as u32) << shift, kind);
            b += 1;
        }

        lane += 1;
    }

    out
}

/// Composite tables for the round transform `T = L ∘ τ`.
pub static ROUND_TABLES: [[u32; 256]; 4] = composite(Diffusion::Round);

/// Composite tables for the key-schedule transform `T' = L' ∘ τ`.
pub static KEY_TABLES: [[u32; 256]; 4] = composite(Diffusion::Key);

/// Applies a composite transform to one word.
#[inline(always)]
pub fn transform(tables: &[[u32; 256]; 4], x: u32) -> u32 {
    tables[0][(x >> 24) as usize]
        ^ tables[1][((x >> 16) & 0xff) as usize]
        ^ tables[2][((x >> 8) & 0xff) as usize]
        ^ tables[3][(x & 0xff) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tau(x: u32) -> u32 {
        let b = x.to_be_bytes().map(|v| SBOX[v as usize]);
        u32::from_be_bytes(b)
    }

    #[test]
    fn ck_matches_published_values() {
        assert_eq!(CK[0], 0x0007_0e15);
        assert_eq!(CK[1], 0x1c23_2a31);
        assert_eq!(CK[31], 0x646b_7279);
    }

    #[test]
    fn round_table_first_entries() {
        assert_eq!(ROUND_TABLES[0][0], 0x8ed5_5b5b);
        assert_eq!(ROUND_TABLES[0][1], 0xd092_4242);
        assert_eq!(ROUND_TABLES[0][2], 0x4dea_a7a7);
        assert_eq!(ROUND_TABLES[0][3], 0x06fd_fbfb);
        assert_eq!(KEY_TABLES[0][0], 0xd66b_1ac0);
        assert_eq!(KEY_TABLES[0][1], 0x9048_1200);
    }

    #[test]
    fn tables_match_direct_substitution_and_diffusion() {
        for x in [0u32, 1, 0x0123_4567, 0x89ab_cdef, 0xdead_beef, u32::MAX] {
            let s = tau(x);
            assert_eq!(
                transform(&ROUND_TABLES, x),
                diffuse(s, Diffusion::Round),
                "T({x:#010x})"
            );
            assert_eq!(
                transform(&KEY_TABLES, x),
                diffuse(s, Diffusion::Key),
                "T'({x:#010x})"
            );
        }
    }
}
