//! Little-endian conversions between 64-byte blocks and 8-word states.

/// Reads a 64-byte block as eight little-endian 64-bit words.
#[inline(always)]
pub(crate) fn words_from_le_bytes(block: &[u8; 64]) -> [u64; 8] {
    let mut out = [0u64; 8];

    for (word, chunk) in out.iter_mut().zip(block.chunks_exact(8)) {
        *word = u64::from_le_bytes(chunk.try_into().unwrap());
    }

    out
}

/// Serializes eight words into a 64-byte little-endian block.
#[inline(always)]
pub(crate) fn words_to_le_bytes(words: &[u64; 8]) -> [u8; 64] {
    let mut out = [0u8; 64];

    for (chunk, word) in out.chunks_exact_mut(8).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    out
}

/// Word-wise XOR, used for the UBI feed-forward.
#[inline(always)]
pub(crate) fn xor_words(a: &[u64; 8], b: &[u64; 8]) -> [u64; 8] {
    core::array::from_fn(|i| a[i] ^ b[i])
}
