//! Block ciphers exposed by the crate.
//!
//! Currently includes Threefish-512, the tweakable cipher underneath
//! Skein-512. It is public so callers can reach the raw compression
//! primitive directly.

pub mod threefish512;

pub use threefish512::Threefish512;
