//! Skein-512 hashing and the Threefish-512 block cipher
//!
//! This crate implements the Skein-512 hash function on top of the
//! Threefish-512 tweakable block cipher, covering straight hashing,
//! keyed hashing (MAC), key derivation and tree hashing.
//!
//! The focus is on **clarity, predictability, and auditability**. Every
//! operation is a bounded, synchronous computation; contexts own all
//! their state and can be moved freely between threads.
//!
//! # Module overview
//!
//! - `cipher`  
//!   Threefish-512: key schedule, 72-round mixing network, and raw block
//!   encryption/decryption.
//!
//! - `hash`  
//!   Skein-512: the UBI chaining construction, the incremental
//!   init/update/final context, the configuration block, optional
//!   key/personalization/nonce inputs and the tree-hash driver.
//!
//! - `observer`  
//!   Instrumentation hooks for inspecting intermediate cipher and UBI
//!   values. No-op by default.
//!
//! - `error`  
//!   The crate error type and the classic Skein result codes.
//!
//! # Example
//!
//! ```rust
//! use skein::hash::Skein512;
//!
//! let mut ctx = Skein512::new(256).unwrap();
//! ctx.update(b"hello ").unwrap();
//! ctx.update(b"world").unwrap();
//! let digest = ctx.finalize().unwrap();
//!
//! assert_eq!(digest.len(), 32);
//! ```
//!
//! # Design goals
//!
//! - No heap allocations in the cipher and the compression function
//! - Every parameter and state transition checked at runtime
//! - Key material wiped when contexts are dropped
//! - Bit-exact wire layout for tweaks and configuration blocks
//!
//! The rotation constants and key-schedule parity are those of the
//! Skein 1.1 submission.

mod primitives;

pub mod cipher;
pub mod error;
pub mod hash;
pub mod observer;

pub use error::{Result, ResultCode, SkeinError};
