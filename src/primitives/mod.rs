//! Primitive helpers
//!
//! Threefish and Skein operate on eight 64-bit words but read and write
//! bytes in little-endian order. The conversions live here so the cipher
//! and the hash share a single definition of the wire layout.

mod conv;

pub(crate) use conv::{words_from_le_bytes, words_to_le_bytes, xor_words};
