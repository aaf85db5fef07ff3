//! Threefish-512 cipher instance
//!
//! A [`Threefish512`] value holds the expanded key schedule for one
//! (key, tweak) pair. Skein builds one per UBI block; callers that want
//! the raw cipher can build their own and process any number of blocks.

use super::computations::{KeySchedule, all_rounds, all_rounds_inverse};
use super::{BLOCK_BYTES, MAX_ROUNDS, MIN_ROUNDS, STANDARD_ROUNDS};
use crate::error::{Result, SkeinError};
use crate::observer::{NoObserver, Observer};
use crate::primitives::{words_from_le_bytes, words_to_le_bytes};

/// Threefish-512 keyed with a 512-bit key and a 128-bit tweak.
pub struct Threefish512 {
    schedule: KeySchedule,
    rounds: usize,
}

impl Threefish512 {
    /// Creates a standard 72-round cipher from key and tweak words.
    pub fn new(key: &[u64; 8], tweak: &[u64; 2]) -> Self {
        Self::with_trusted_rounds(key, tweak, STANDARD_ROUNDS)
    }

    /// Creates a standard cipher from a 64-byte key and a 16-byte tweak,
    /// both read as little-endian words.
    pub fn from_bytes(key: &[u8; 64], tweak: &[u8; 16]) -> Self {
        let tweak = [
            u64::from_le_bytes(tweak[..8].try_into().unwrap()),
            u64::from_le_bytes(tweak[8..].try_into().unwrap()),
        ];

        Self::new(&words_from_le_bytes(key), &tweak)
    }

    /// Creates a cipher with a non-default round count.
    ///
    /// Anything other than 72 rounds is **not Threefish-512**: the output
    /// is incompatible with every other implementation. This exists for
    /// reduced-round experiments only.
    ///
    /// # Errors
    /// [`SkeinError::InvalidRounds`] unless `rounds` is a multiple of 8
    /// in `40..=112`.
    pub fn with_rounds(key: &[u64; 8], tweak: &[u64; 2], rounds: usize) -> Result<Self> {
        validate_rounds(rounds)?;

        Ok(Self::with_trusted_rounds(key, tweak, rounds))
    }

    pub(crate) fn with_trusted_rounds(key: &[u64; 8], tweak: &[u64; 2], rounds: usize) -> Self {
        Self {
            schedule: KeySchedule::new(key, tweak),
            rounds,
        }
    }

    /// Number of rounds this instance runs.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Encrypts one block given as words.
    pub fn encrypt_words(&self, block: &[u64; 8]) -> [u64; 8] {
        self.encrypt_words_observed(block, &NoObserver)
    }

    /// Encrypts one block, reporting the state to `observer` at every
    /// subkey-injection point.
    pub fn encrypt_words_observed<O: Observer>(&self, block: &[u64; 8], observer: &O) -> [u64; 8] {
        let mut x = *block;
        all_rounds(&mut x, &self.schedule, self.rounds, observer);
        x
    }

    /// Decrypts one block given as words.
    pub fn decrypt_words(&self, block: &[u64; 8]) -> [u64; 8] {
        let mut x = *block;
        all_rounds_inverse(&mut x, &self.schedule, self.rounds);
        x
    }

    /// Encrypts one 64-byte block.
    pub fn encrypt_block(&self, block: &[u8; 64]) -> [u8; 64] {
        words_to_le_bytes(&self.encrypt_words(&words_from_le_bytes(block)))
    }

    /// Decrypts one 64-byte block.
    pub fn decrypt_block(&self, block: &[u8; 64]) -> [u8; 64] {
        words_to_le_bytes(&self.decrypt_words(&words_from_le_bytes(block)))
    }

    /// Encrypts `input` block by block into `output`.
    ///
    /// # Parameters
    /// - `input`: Plaintext, a whole number of 64-byte blocks
    /// - `output`: Ciphertext destination, same length as `input`
    ///
    /// # Returns
    /// - The number of blocks processed
    ///
    /// # Errors
    /// [`SkeinError::UnalignedBlocks`] if `input` is not a whole number of
    /// blocks or `output` has a different length. Nothing is written.
    ///
    /// # Notes
    /// - Every block uses the same key and tweak (ECB over the tweakable
    ///   cipher).
    /// - Words are read and written little-endian.
    pub fn process_blocks(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.process_with(input, output, Self::encrypt_block)
    }

    /// Inverse of [`Threefish512::process_blocks`].
    pub fn process_blocks_inverse(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.process_with(input, output, Self::decrypt_block)
    }

    fn process_with(
        &self,
        input: &[u8],
        output: &mut [u8],
        f: fn(&Self, &[u8; 64]) -> [u8; 64],
    ) -> Result<usize> {
        // Validate both buffers before writing anything
        if input.len() % BLOCK_BYTES != 0 {
            return Err(SkeinError::UnalignedBlocks(input.len()));
        }

        if output.len() != input.len() {
            return Err(SkeinError::UnalignedBlocks(output.len()));
        }

        for (src, dst) in input
            .chunks_exact(BLOCK_BYTES)
            .zip(output.chunks_exact_mut(BLOCK_BYTES))
        {
            dst.copy_from_slice(&f(self, src.try_into().unwrap()));
        }

        Ok(input.len() / BLOCK_BYTES)
    }
}

/// Checks a round count for the reduced/extended-round hook.
///
/// Accepted values are multiples of 8 in `40..=112`. A valid but
/// non-standard value is logged as a warning.
pub fn validate_rounds(rounds: usize) -> Result<()> {
    if rounds % 8 != 0 || !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
        return Err(SkeinError::InvalidRounds(rounds));
    }

    if rounds != STANDARD_ROUNDS {
        tracing::warn!(
            rounds,
            "non-standard Threefish round count; output is not interoperable"
        );
    }

    Ok(())
}
