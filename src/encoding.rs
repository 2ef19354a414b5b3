//! Fixed-width integer encodings (GB/T 32918.1-2016, 4.2).
//!
//! Integers are written as exactly `width` big-endian bytes, left-padded
//! with zeros. Field elements are additionally checked against their
//! modulus before encoding. Decoding treats any byte string as an unsigned
//! big-endian integer and performs no range check.
//!
//! Negative inputs, which the standard also rejects, cannot be expressed
//! with [`U256`].

use crate::primitives::U256;

/// Errors raised when an integer cannot be given its canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The value needs more than `width` bytes.
    #[error("integer does not fit in {width} bytes")]
    TooLarge { width: usize },

    /// The value is not smaller than the field modulus.
    #[error("integer not in the field")]
    NotInField,
}

/// Writes `x` into `buf` as a big-endian integer of exactly `buf.len()` bytes.
///
/// # Errors
/// [`EncodingError::TooLarge`] if `x` has more significant bytes than `buf`.
pub fn integer_to_bytes(x: &U256, buf: &mut [u8]) -> Result<(), EncodingError> {
    let significant = x.bits().div_ceil(8);
    if significant > buf.len() {
        return Err(EncodingError::TooLarge { width: buf.len() });
    }

    let bytes = x.to_be_bytes();
    let take = buf.len().min(bytes.len());
    let (padding, digits) = buf.split_at_mut(buf.len() - take);

    padding.fill(0);
    digits.copy_from_slice(&bytes[bytes.len() - take..]);

    Ok(())
}

/// Writes the field element `x ∈ [0, q)` into `buf`.
///
/// `buf` must be at least as wide as the modulus.
///
/// # Errors
/// - [`EncodingError::NotInField`] if `x ≥ q`
/// - [`EncodingError::TooLarge`] if `buf` is narrower than `q`
pub fn field_to_bytes(x: &U256, q: &U256, buf: &mut [u8]) -> Result<(), EncodingError> {
    if x >= q {
        return Err(EncodingError::NotInField);
    }

    if q.bits().div_ceil(8) > buf.len() {
        return Err(EncodingError::TooLarge { width: buf.len() });
    }

    integer_to_bytes(x, buf)
}

/// Interprets `bytes` as an unsigned big-endian integer.
///
/// Inputs longer than 32 bytes keep their low-order 256 bits.
pub fn bytes_to_integer(bytes: &[u8]) -> U256 {
    let tail = &bytes[bytes.len().saturating_sub(32)..];

    let mut out = [0u8; 32];
    out[32 - tail.len()..].copy_from_slice(tail);

    U256::from_be_bytes(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_requested_width() {
        let mut buf = [0xffu8; 4];
        integer_to_bytes(&U256::from(0x0102u16), &mut buf).unwrap();
        assert_eq!(buf, [0, 0, 1, 2]);

        let mut wide = [0xffu8; 40];
        integer_to_bytes(&U256::MAX, &mut wide).unwrap();
        assert!(wide[..8].iter().all(|&b| b == 0));
        assert!(wide[8..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn rejects_values_wider_than_buffer() {
        let mut buf = [0u8; 1];
        assert_eq!(
            integer_to_bytes(&U256::from(0x0100u16), &mut buf),
            Err(EncodingError::TooLarge { width: 1 })
        );

        let mut empty: [u8; 0] = [];
        assert!(integer_to_bytes(&U256::ZERO, &mut empty).is_ok());
    }

    #[test]
    fn field_encoding_checks_range() {
        let q = U256::from(251u8);
        let mut buf = [0u8; 1];

        assert!(field_to_bytes(&U256::from(250u8), &q, &mut buf).is_ok());
        assert_eq!(buf, [250]);
        assert_eq!(
            field_to_bytes(&q, &q, &mut buf),
            Err(EncodingError::NotInField)
        );

        let mut narrow: [u8; 0] = [];
        assert_eq!(
            field_to_bytes(&U256::ZERO, &q, &mut narrow),
            Err(EncodingError::TooLarge { width: 0 })
        );
    }

    #[test]
    fn decode_is_unchecked_big_endian() {
        assert_eq!(bytes_to_integer(&[]), U256::ZERO);
        assert_eq!(bytes_to_integer(&[1, 0]), U256::from(256u16));

        let mut long = [0u8; 33];
        long[0] = 0xff;
        long[32] = 7;
        assert_eq!(bytes_to_integer(&long), U256::from(7u8));
    }
}
