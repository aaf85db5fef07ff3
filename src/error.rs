//! Error types and result codes
//!
//! Every fallible operation in the crate returns [`Result`], carrying a
//! [`SkeinError`] that describes what was rejected. The classic Skein API
//! reports failures as small integer codes; [`ResultCode`] preserves that
//! surface for callers that need it (e.g. a C harness).

use thiserror::Error;

/// Errors reported by the cipher and hash entry points.
///
/// All checks run before any state is mutated, so a failed call leaves
/// the context usable and the caller's output buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeinError {
    /// A zero-bit digest, or one above the output cap, was requested.
    #[error("requested digest length is zero or exceeds the output cap")]
    BadHashLen,

    /// The context no longer accepts message input or a final block.
    #[error("hash context has already been finalized")]
    Finalized,

    /// Tree level and position can only change before the first
    /// message byte.
    #[error("message input has already started")]
    MessageStarted,

    /// `output` was called before the final message block was processed.
    #[error("output stage requires a padded context")]
    NotPadded,

    /// The caller's buffer cannot hold the requested digest.
    #[error("output buffer holds {got} bytes but {needed} are required")]
    OutputTooShort { needed: usize, got: usize },

    /// Tree levels are a 7-bit tweak field.
    #[error("tree level {0} does not fit in the 7-bit tweak field")]
    TreeLevelOutOfRange(u8),

    /// Tree parameters outside the supported ranges.
    #[error("invalid tree parameters: {0}")]
    InvalidTreeInfo(&'static str),

    /// Raw block processing needs whole 64-byte blocks of equal length.
    #[error("block buffer of {0} bytes is not a whole number of blocks")]
    UnalignedBlocks(usize),

    /// Round count outside `40..=112` or not a multiple of 8.
    #[error("round count {0} must be a multiple of 8 in 40..=112")]
    InvalidRounds(usize),

    /// The 96-bit processed-byte counter would wrap.
    #[error("message position overflows the 96-bit tweak counter")]
    PositionOverflow,

    /// A tweak word carries a block type code that Skein does not define.
    #[error("unknown block type code {0}")]
    UnknownBlockType(u8),
}

/// Numeric return codes of the byte-level Skein interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResultCode {
    Success = 0,
    Fail = 1,
    BadHashLen = 2,
}

impl ResultCode {
    /// Maps a call result onto its return code.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ResultCode::Success,
            Err(err) => err.code(),
        }
    }
}

impl SkeinError {
    /// Return code for this error. Only a zero digest length has its own
    /// code; every other rejection is a generic failure.
    pub fn code(&self) -> ResultCode {
        match self {
            SkeinError::BadHashLen => ResultCode::BadHashLen,
            _ => ResultCode::Fail,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, SkeinError>;
