//! Hash algorithms exposed by the crate.
//!
//! Currently includes Skein-512 (straight hashing, MAC, key derivation
//! and tree hashing) with a pure-Rust implementation.

pub mod skein512;

/// Re-export of the Skein-512 context and convenience functions.
pub use skein512::{Skein512, derive_key, skein512, skein512_mac};
