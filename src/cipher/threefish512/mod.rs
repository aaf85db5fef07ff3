//! Threefish-512 tweakable block cipher
//!
//! Threefish-512 encrypts a 512-bit block under a 512-bit key and a
//! 128-bit tweak using 72 rounds of add-rotate-xor mixing. A subkey
//! derived from the key and tweak is injected before the first round
//! and after every fourth round.
//!
//! The implementation is split the same way as the hash modules:
//!
//! - `computations`: subkey injection and the mixing rounds
//! - `core`: the keyed cipher instance and its block-level API

pub(crate) mod computations;
pub mod core;

pub use self::core::Threefish512;

/// Number of 64-bit words in a block, in the key and in the state.
pub const STATE_WORDS: usize = 8;

/// Block size in bytes.
pub const BLOCK_BYTES: usize = 64;

/// Round count of the standard cipher.
pub const STANDARD_ROUNDS: usize = 72;

/// Smallest and largest round counts accepted by the round-count hook.
pub const MIN_ROUNDS: usize = 40;
pub const MAX_ROUNDS: usize = 112;

/// Key schedule parity constant folded into the ninth key word.
pub(crate) const KEY_SCHEDULE_PARITY: u64 = 0x5555_5555_5555_5555;

/// Rotation constants `R_512[round % 8][pair]`.
pub(crate) const ROTATIONS: [[u32; 4]; 8] = [
    [38, 30, 50, 53],
    [48, 20, 43, 31],
    [34, 14, 15, 27],
    [26, 12, 58, 7],
    [33, 49, 8, 42],
    [39, 27, 41, 14],
    [29, 26, 11, 9],
    [33, 51, 39, 35],
];

/// Word permutation applied after every mixing round:
/// `next[i] = current[PERMUTATION[i]]`.
pub(crate) const PERMUTATION: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];
