//! SM3 core hashing functions
//!
//! This module implements the streaming side of SM3:
//! - the compression function operating on 512-bit blocks
//! - an incremental hasher that buffers partial blocks
//! - exact serialisation of a mid-stream hasher state
//!
//! Padding follows the usual Merkle–Damgård rule: a single `0x80` byte,
//! zeros up to 56 bytes modulo 64, then the message length in bits as a
//! 64-bit big-endian integer.

use std::io;

use super::computations::{all_rounds, expand};
use super::{BLOCK_SIZE, IV, SIZE};

const MAGIC: &[u8; 4] = b"sm3\x03";

/// Length of a serialised hasher state.
pub const MARSHALED_SIZE: usize = MAGIC.len() + 8 * 4 + BLOCK_SIZE + 8;

/// Errors returned when restoring a serialised hasher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HashStateError {
    /// The input does not start with the SM3 state identifier.
    #[error("invalid hash state identifier")]
    InvalidIdentifier,

    /// The input has the right identifier but the wrong length.
    #[error("invalid hash state size: {0} bytes")]
    InvalidLength(usize),
}

/// Compresses one 64-byte block into `state`.
///
/// # Notes
/// - Input words are interpreted as big-endian.
/// - `block` must be exactly [`BLOCK_SIZE`] bytes; callers only pass
///   chunks produced by `chunks_exact(BLOCK_SIZE)` or the internal buffer.
pub fn compress(block: &[u8], state: &mut [u32; 8]) {
    debug_assert_eq!(block.len(), BLOCK_SIZE);

    let mut words = [0u32; 16];
    for (slot, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *slot = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    all_rounds(state, &expand(words));
}

/// Streaming SM3 hasher.
///
/// Feeding the same bytes through any sequence of [`update`](Sm3::update)
/// calls yields the same digest as a single call with their concatenation.
#[derive(Clone, Debug)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    length: u64,
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm3 {
    /// Creates a hasher in the initial state.
    pub fn new() -> Self {
        Self {
            state: IV,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            length: 0,
        }
    }

    /// Restores the initial state, discarding any absorbed input.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Absorbs `input`.
    pub fn update(&mut self, mut input: &[u8]) {
        self.length = self.length.wrapping_add(input.len() as u64);

        if self.buffered > 0 {
            let take = input.len().min(BLOCK_SIZE - self.buffered);
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }

            compress(&self.buffer, &mut self.state);
            self.buffered = 0;
        }

        let blocks = input.chunks_exact(BLOCK_SIZE);
        let rest = blocks.remainder();

        for block in blocks {
            compress(block, &mut self.state);
        }

        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Returns the digest of everything absorbed so far.
    ///
    /// The hasher itself is left untouched and can keep absorbing input.
    pub fn sum(&self) -> [u8; SIZE] {
        self.clone().finalize()
    }

    /// Consumes the hasher and returns the digest.
    pub fn finalize(mut self) -> [u8; SIZE] {
        let bit_len = self.length << 3;

        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;

        // Not enough room for the length field: spill into a second block.
        if self.buffered > BLOCK_SIZE - 9 {
            compress(&block, &mut self.state);
            block = [0u8; BLOCK_SIZE];
        }

        block[BLOCK_SIZE - 8..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&block, &mut self.state);

        let mut out = [0u8; SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        out
    }

    /// Serialises the exact mid-stream state.
    ///
    /// Layout: identifier, eight state words (big-endian), the pending
    /// block zero-padded to 64 bytes, total input length in bytes
    /// (big-endian `u64`).
    pub fn marshal(&self) -> [u8; MARSHALED_SIZE] {
        let mut out = [0u8; MARSHALED_SIZE];
        let (magic, rest) = out.split_at_mut(MAGIC.len());
        let (state, rest) = rest.split_at_mut(8 * 4);
        let (buffer, length) = rest.split_at_mut(BLOCK_SIZE);

        magic.copy_from_slice(MAGIC);
        for (chunk, word) in state.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        buffer[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        length.copy_from_slice(&self.length.to_be_bytes());

        out
    }

    /// Restores a state produced by [`marshal`](Sm3::marshal).
    ///
    /// # Errors
    /// - [`HashStateError::InvalidIdentifier`] if the identifier is missing
    /// - [`HashStateError::InvalidLength`] if `bytes` has the wrong size
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, HashStateError> {
        if !bytes.starts_with(MAGIC) {
            return Err(HashStateError::InvalidIdentifier);
        }

        if bytes.len() != MARSHALED_SIZE {
            return Err(HashStateError::InvalidLength(bytes.len()));
        }

        let (state_bytes, rest) = bytes[MAGIC.len()..].split_at(8 * 4);
        let (buffer_bytes, length_bytes) = rest.split_at(BLOCK_SIZE);

        let mut hasher = Self::new();

        for (word, chunk) in hasher.state.iter_mut().zip(state_bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let mut length = [0u8; 8];
        length.copy_from_slice(length_bytes);
        hasher.length = u64::from_be_bytes(length);

        hasher.buffered = (hasher.length % BLOCK_SIZE as u64) as usize;
        hasher.buffer[..hasher.buffered].copy_from_slice(&buffer_bytes[..hasher.buffered]);

        Ok(hasher)
    }
}

impl io::Write for Sm3 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Computes the SM3 digest of `input` in one call.
pub fn sm3(input: &[u8]) -> [u8; SIZE] {
    let mut hasher = Sm3::new();
    hasher.update(input);
    hasher.finalize()
}
