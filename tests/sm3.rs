use guomi::hash::sm3::{self, HashStateError, MARSHALED_SIZE, Sm3};
use guomi::hash::sm3 as sm3_digest;

use hex_literal::hex;
use std::io::Write;

fn expect_sm3_eq(input: &[u8], expected: &[u8; 32]) {
    let got = sm3_digest(input);

    assert_eq!(
        &got,
        expected,
        "Digest mismatch for input of {} bytes\nExpected {}\nGot      {}",
        input.len(),
        hex::encode(expected),
        hex::encode(got),
    );
}

// -------------------------------------------------------
// 1. PUBLISHED VECTORS (GB/T 32905-2016, Appendix A)
// -------------------------------------------------------

#[test]
fn sm3_abc_vector() {
    expect_sm3_eq(
        b"abc",
        &hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0"),
    );
}

#[test]
fn sm3_abcd_x16_vector() {
    expect_sm3_eq(
        &b"abcd".repeat(16),
        &hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732"),
    );
}

#[test]
fn sm3_empty_input() {
    expect_sm3_eq(
        &[],
        &hex!("1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b"),
    );
}

#[test]
fn sm3_thousand_a() {
    expect_sm3_eq(
        &[b'a'; 1000],
        &hex!("f4bedca973227d45c5b822551d2e762d4cfb0e9af70b241452545727b5fb046f"),
    );
}

#[test]
fn sizes_are_exported() {
    assert_eq!(sm3::SIZE, 32);
    assert_eq!(sm3::BLOCK_SIZE, 64);
}

// -------------------------------------------------------
// 2. STREAMING
// -------------------------------------------------------

#[test]
fn every_split_point_matches_one_shot() {
    let data: Vec<u8> = (0..200u32).map(|i| (i * 31 + 7) as u8).collect();
    let expected = sm3_digest(&data);

    for split in 0..=data.len() {
        let mut hasher = Sm3::new();
        hasher.update(&data[..split]);
        hasher.update(&data[split..]);

        assert_eq!(hasher.finalize(), expected, "split at {split}");
    }
}

#[test]
fn irregular_chunks_match_one_shot() {
    let data = [0x5au8; 1000];
    let expected = sm3_digest(&data);

    let mut hasher = Sm3::new();
    let mut rest = &data[..];
    for size in [1usize, 63, 64, 65, 0, 127, 3].iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let take = (*size).min(rest.len());
        hasher.update(&rest[..take]);
        rest = &rest[take..];
    }

    assert_eq!(hasher.finalize(), expected);
}

#[test]
fn intermediate_sum_does_not_disturb_stream() {
    let mut interrupted = Sm3::new();
    interrupted.update(b"abcd".repeat(10).as_slice());
    let partial = interrupted.sum();
    interrupted.update(b"abcd".repeat(6).as_slice());

    assert_eq!(partial, sm3_digest(&b"abcd".repeat(10)));
    assert_eq!(
        interrupted.finalize(),
        hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732")
    );
}

#[test]
fn io_write_feeds_the_hasher() {
    let mut hasher = Sm3::new();
    hasher.write_all(b"ab").unwrap();
    hasher.write_all(b"c").unwrap();
    hasher.flush().unwrap();

    assert_eq!(hasher.finalize(), sm3_digest(b"abc"));
}

// -------------------------------------------------------
// 3. STATE SERIALISATION
// -------------------------------------------------------

#[test]
fn marshal_restore_continues_stream() {
    let data: Vec<u8> = (0..=255u8).cycle().take(300).collect();
    let expected = sm3_digest(&data);

    for cut in [0usize, 1, 55, 64, 100, 128, 299] {
        let mut first = Sm3::new();
        first.update(&data[..cut]);

        let state = first.marshal();
        assert_eq!(state.len(), MARSHALED_SIZE);
        assert_eq!(&state[..4], b"sm3\x03");

        let mut restored = Sm3::unmarshal(&state).unwrap();
        restored.update(&data[cut..]);

        assert_eq!(restored.finalize(), expected, "cut at {cut}");
    }
}

#[test]
fn marshal_layout() {
    let mut hasher = Sm3::new();
    hasher.update(b"abc");
    let state = hasher.marshal();

    // Initial chaining value, untouched until a full block arrives.
    assert_eq!(&state[4..8], &hex!("7380166f"));
    assert_eq!(&state[36..39], b"abc");
    assert!(state[39..100].iter().all(|&b| b == 0));
    assert_eq!(&state[100..], &3u64.to_be_bytes());
}

#[test]
fn unmarshal_rejects_bad_input() {
    let state = Sm3::new().marshal();

    assert_eq!(
        Sm3::unmarshal(b"sha\x03").unwrap_err(),
        HashStateError::InvalidIdentifier
    );
    assert_eq!(
        Sm3::unmarshal(&[]).unwrap_err(),
        HashStateError::InvalidIdentifier
    );
    assert_eq!(
        Sm3::unmarshal(&state[..107]).unwrap_err(),
        HashStateError::InvalidLength(107)
    );
}

#[test]
fn reset_restores_initial_state() {
    let mut hasher = Sm3::new();
    hasher.update(b"some earlier input");
    hasher.reset();
    hasher.update(b"abc");

    assert_eq!(hasher.finalize(), sm3_digest(b"abc"));
}
