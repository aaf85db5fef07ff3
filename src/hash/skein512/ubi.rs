//! Unique Block Iteration
//!
//! UBI turns Threefish into a compression function: each 64-byte block
//! is encrypted under the running chaining value (as key) and the
//! current tweak, and the ciphertext is XORed with the plaintext to form
//! the next chaining value.

use super::BLOCK_BYTES;
use super::tweak::{BlockType, Tweak};
use crate::cipher::Threefish512;
use crate::error::Result;
use crate::observer::{BlockEvent, Observer};
use crate::primitives::{words_from_le_bytes, xor_words};

/// Compresses whole blocks into `chain`.
///
/// `blocks` must be a non-empty multiple of 64 bytes. Before each block
/// the tweak position advances by `byte_count_add`, which is 64 except
/// for a padded final block or the output counter. `FIRST` is cleared
/// after the first block.
pub(crate) fn process_blocks<O: Observer>(
    chain: &mut [u64; 8],
    tweak: &mut Tweak,
    blocks: &[u8],
    byte_count_add: usize,
    rounds: usize,
    observer: &O,
) -> Result<()> {
    debug_assert!(!blocks.is_empty() && blocks.len() % BLOCK_BYTES == 0);

    for block in blocks.chunks_exact(BLOCK_BYTES) {
        tweak.advance(byte_count_add)?;

        let plaintext = words_from_le_bytes(block.try_into().unwrap());
        let cipher = Threefish512::with_trusted_rounds(chain, &tweak.words(), rounds);
        let next = xor_words(&cipher.encrypt_words_observed(&plaintext, observer), &plaintext);

        observer.on_block(&BlockEvent {
            tweak: *tweak,
            chaining_in: chain,
            block: &plaintext,
            chaining_out: &next,
        });

        *chain = next;
        tweak.set_first(false);
    }

    Ok(())
}

/// Runs one complete UBI pass of `block_type` over `message`.
///
/// The last block (or the single zero block of an empty message) is
/// zero-padded and carries `FINAL`; the position counts real bytes only.
pub(crate) fn ubi_pass<O: Observer>(
    chain: &mut [u64; 8],
    block_type: BlockType,
    message: &[u8],
    rounds: usize,
    observer: &O,
) -> Result<()> {
    let mut tweak = Tweak::start(block_type);

    // Keep at least one byte (or the empty tail) for the final block.
    let full = message.len().saturating_sub(1) / BLOCK_BYTES * BLOCK_BYTES;
    let (body, tail) = message.split_at(full);

    if !body.is_empty() {
        process_blocks(chain, &mut tweak, body, BLOCK_BYTES, rounds, observer)?;
    }

    let mut last = [0u8; BLOCK_BYTES];
    last[..tail.len()].copy_from_slice(tail);

    tweak.set_final(true);
    process_blocks(chain, &mut tweak, &last, tail.len(), rounds, observer)
}
