//! Skein-512
//!
//! Skein-512 hashes with Threefish-512 driven in UBI chaining mode. A
//! hash is a sequence of UBI passes, each tagged with its block type:
//!
//! ```text
//! [Key] -> Config -> [Personalization] -> [PublicKey] -> [KeyIdentifier]
//!       -> [Nonce] -> Message -> Output
//! ```
//!
//! Bracketed passes are optional. The submodules are:
//!
//! - `core`: the [`Skein512`] context and one-shot helpers
//! - `config`: configuration block, [`TreeInfo`] and [`Skein512Params`]
//! - `tweak`: the typed [`Tweak`] and [`BlockType`]
//! - `tree`: tree-mode hashing with [`TreeHasher`]
//! - `ubi`: the chaining construction itself

pub mod config;
pub mod core;
pub mod tree;
pub mod tweak;
pub(crate) mod ubi;

pub use self::config::{MAX_OUTPUT_BITS, Skein512Params, TreeInfo};
pub use self::core::{Phase, Skein512, derive_key, skein512, skein512_mac};
pub use self::tree::{NodeObserver, TreeHasher};
pub use self::tweak::{BlockType, MAX_TREE_LEVEL, Tweak};

/// Number of 64-bit words in the chaining value.
pub const STATE_WORDS: usize = 8;

/// UBI block size in bytes.
pub const BLOCK_BYTES: usize = 64;

/// Width of the internal state in bits.
pub const STATE_BITS: usize = 512;
