//! SM4 key expansion and block transform.
//!
//! ## Notes
//!
//! - The cipher is keyed once; the 32 round keys are the only state.
//! - Encryption and decryption share one routine and differ only in the
//!   order the round keys are consumed.
//! - Table lookups are indexed by data, so this code is not constant-time.

use super::tables::{CK, FK, KEY_TABLES, ROUND_TABLES, transform};
use super::{BLOCK_SIZE, KEY_SIZE};

/// Errors reported by the SM4 cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// The key is not exactly [`KEY_SIZE`] bytes.
    #[error("sm4: invalid key size {0}")]
    InvalidKeySize(usize),

    /// A block buffer is not exactly [`BLOCK_SIZE`] bytes.
    #[error("sm4: invalid block size {0}")]
    InvalidBlockSize(usize),
}

/// An SM4 instance holding the expanded key schedule.
#[derive(Clone)]
pub struct Sm4 {
    round_keys: [u32; 32],
}

impl Sm4 {
    /// Expands `key` into the round-key schedule.
    ///
    /// # Errors
    /// [`CipherError::InvalidKeySize`] if `key` is not 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_SIZE {
            return Err(CipherError::InvalidKeySize(key.len()));
        }

        let mut k = load_words(key);
        for (word, fk) in k.iter_mut().zip(FK) {
            *word ^= fk;
        }

        let mut round_keys = [0u32; 32];
        for (i, rk) in round_keys.iter_mut().enumerate() {
            let mixed = k[(i + 1) % 4] ^ k[(i + 2) % 4] ^ k[(i + 3) % 4] ^ CK[i];
            k[i % 4] ^= transform(&KEY_TABLES, mixed);
            *rk = k[i % 4];
        }

        Ok(Self { round_keys })
    }

    /// Encrypts one block in place.
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        crypt(self.round_keys.iter().copied(), block);
    }

    /// Decrypts one block in place.
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        crypt(self.round_keys.iter().rev().copied(), block);
    }

    /// Encrypts the block in `src` into `dst`.
    ///
    /// # Panics
    /// Panics with [`CipherError::InvalidBlockSize`] unless both buffers
    /// are exactly 16 bytes.
    pub fn encrypt(&self, dst: &mut [u8], src: &[u8]) {
        let mut block = check_buffers(dst, src);
        self.encrypt_block(&mut block);
        dst.copy_from_slice(&block);
    }

    /// Decrypts the block in `src` into `dst`.
    ///
    /// # Panics
    /// Panics with [`CipherError::InvalidBlockSize`] unless both buffers
    /// are exactly 16 bytes.
    pub fn decrypt(&self, dst: &mut [u8], src: &[u8]) {
        let mut block = check_buffers(dst, src);
        self.decrypt_block(&mut block);
        dst.copy_from_slice(&block);
    }
}

impl std::fmt::Debug for Sm4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sm4").finish_non_exhaustive()
    }
}

fn check_buffers(dst: &[u8], src: &[u8]) -> [u8; BLOCK_SIZE] {
    for len in [src.len(), dst.len()] {
        if len != BLOCK_SIZE {
            panic!("{}", CipherError::InvalidBlockSize(len));
        }
    }

    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(src);
    block
}

fn load_words(bytes: &[u8]) -> [u32; 4] {
    let mut out = [0u32; 4];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

/// Runs the 32 rounds with the given key order.
///
/// Each round replaces the oldest word, and the output is the final four
/// words in reverse order.
fn crypt(round_keys: impl Iterator<Item = u32>, block: &mut [u8; BLOCK_SIZE]) {
    let mut x = load_words(block);

    for (i, rk) in round_keys.enumerate() {
        let mixed = x[(i + 1) % 4] ^ x[(i + 2) % 4] ^ x[(i + 3) % 4] ^ rk;
        x[i % 4] ^= transform(&ROUND_TABLES, mixed);
    }

    for (chunk, word) in block.chunks_exact_mut(4).zip(x.iter().rev()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
}
