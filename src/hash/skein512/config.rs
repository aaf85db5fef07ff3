//! Configuration block and hashing parameters
//!
//! The configuration block is the first UBI input of every Skein hash
//! (after the optional key). It binds the digest to its output length
//! and tree layout:
//!
//! ```text
//! bytes  0..8   schema word: version 1 (high 32 bits), "SHA3" (low 32 bits)
//! bytes  8..16  output length in bits
//! bytes 16..24  tree info: leaf size, node fanout, max level (one byte each)
//! bytes 24..32  reserved, zero
//! ```

use crate::cipher::threefish512::STANDARD_ROUNDS;
use crate::cipher::threefish512::core::validate_rounds;
use crate::error::{Result, SkeinError};

/// Schema version carried in the configuration block.
pub const SCHEMA_VERSION: u32 = 1;

/// ASCII "SHA3", read as a little-endian 32-bit integer.
pub const SCHEMA_ID: u32 = 0x3341_4853;

/// The full schema word.
pub const SCHEMA_WORD: u64 = ((SCHEMA_VERSION as u64) << 32) | SCHEMA_ID as u64;

/// Meaningful length of the configuration block; the rest of the UBI
/// block is zero padding.
pub const CONFIG_BYTES: usize = 32;

/// Largest digest length accepted, in bits (512 MiB of output).
///
/// `finalize` and `output` allocate the whole digest up front.
pub const MAX_OUTPUT_BITS: usize = u32::MAX as usize;

const TREE_LEAF_POS: u32 = 0;
const TREE_NODE_POS: u32 = 8;
const TREE_MAX_LEVEL_POS: u32 = 16;

/// Tree-hashing layout.
///
/// Leaves cover `64 · 2^leaf_size_log2` message bytes, interior nodes
/// combine `2^node_fanout_log2` child results, and `max_level` caps the
/// height of the tree. All three zero means sequential hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TreeInfo {
    pub leaf_size_log2: u8,
    pub node_fanout_log2: u8,
    pub max_level: u8,
}

impl TreeInfo {
    /// Plain sequential hashing.
    pub const SEQUENTIAL: Self = Self {
        leaf_size_log2: 0,
        node_fanout_log2: 0,
        max_level: 0,
    };

    /// Builds and validates a tree layout.
    pub fn new(leaf_size_log2: u8, node_fanout_log2: u8, max_level: u8) -> Result<Self> {
        let info = Self {
            leaf_size_log2,
            node_fanout_log2,
            max_level,
        };

        info.validate()?;
        Ok(info)
    }

    pub fn is_sequential(&self) -> bool {
        *self == Self::SEQUENTIAL
    }

    /// Checks the layout. The sequential sentinel is always valid;
    /// otherwise leaves and nodes must span at least two blocks, the tree
    /// needs at least two levels, and node sizes must be addressable.
    pub fn validate(&self) -> Result<()> {
        if self.is_sequential() {
            return Ok(());
        }

        if self.leaf_size_log2 == 0 {
            return Err(SkeinError::InvalidTreeInfo("leaf size must be at least 2 blocks"));
        }

        if self.node_fanout_log2 == 0 {
            return Err(SkeinError::InvalidTreeInfo("node fanout must be at least 2"));
        }

        if self.max_level < 2 {
            return Err(SkeinError::InvalidTreeInfo("max level must be at least 2"));
        }

        if self.leaf_bytes().is_none() || self.node_bytes().is_none() {
            return Err(SkeinError::InvalidTreeInfo("node size overflows usize"));
        }

        Ok(())
    }

    /// Message bytes per leaf, if representable.
    pub fn leaf_bytes(&self) -> Option<usize> {
        block_span(self.leaf_size_log2)
    }

    /// Child-result bytes per interior node, if representable.
    pub fn node_bytes(&self) -> Option<usize> {
        block_span(self.node_fanout_log2)
    }

    /// Packs the layout into the configuration-block word.
    pub const fn to_word(self) -> u64 {
        ((self.leaf_size_log2 as u64) << TREE_LEAF_POS)
            | ((self.node_fanout_log2 as u64) << TREE_NODE_POS)
            | ((self.max_level as u64) << TREE_MAX_LEVEL_POS)
    }

    /// Unpacks and validates a configuration-block word.
    ///
    /// # Errors
    /// [`SkeinError::InvalidTreeInfo`] if bits above 23 are set or the
    /// layout fails validation.
    pub fn from_word(word: u64) -> Result<Self> {
        if word >> 24 != 0 {
            return Err(SkeinError::InvalidTreeInfo("reserved tree info bits are set"));
        }

        Self::new(
            (word >> TREE_LEAF_POS) as u8,
            (word >> TREE_NODE_POS) as u8,
            (word >> TREE_MAX_LEVEL_POS) as u8,
        )
    }
}

/// `64 · 2^log2` bytes, or `None` when that does not fit in `usize`.
fn block_span(log2: u8) -> Option<usize> {
    1usize.checked_shl(log2 as u32 + 6)
}

/// Builds the 64-byte UBI block holding the configuration string.
pub(crate) fn config_block(output_bits: usize, tree: TreeInfo) -> [u8; 64] {
    let mut block = [0u8; 64];

    block[0..8].copy_from_slice(&SCHEMA_WORD.to_le_bytes());
    block[8..16].copy_from_slice(&(output_bits as u64).to_le_bytes());
    block[16..24].copy_from_slice(&tree.to_word().to_le_bytes());

    block
}

/// Parameters for a Skein-512 computation.
///
/// Every optional input is absorbed as its own UBI pass, in this order:
/// key, configuration, personalization, public key, key identifier,
/// nonce. `None` and an empty vector are equivalent.
///
/// # Recommended Values
///
/// - `output_bits`: 512 for general hashing; 256 where a shorter digest
///   is enough
/// - `key`: 64 bytes for MAC use (the chaining width)
/// - `rounds`: leave at 72
#[derive(Clone, Debug)]
pub struct Skein512Params {
    /// Digest length in bits, `1..=MAX_OUTPUT_BITS`.
    pub output_bits: usize,
    /// Tree layout; [`TreeInfo::SEQUENTIAL`] for ordinary hashing.
    pub tree: TreeInfo,
    /// MAC or KDF key.
    pub key: Option<Vec<u8>>,
    /// Application personalization string.
    pub personalization: Option<Vec<u8>>,
    /// Signer's public key, for signature hashing.
    pub public_key: Option<Vec<u8>>,
    /// KDF key identifier.
    pub key_identifier: Option<Vec<u8>>,
    /// Nonce for stream cipher or PRNG use.
    pub nonce: Option<Vec<u8>>,
    /// Threefish round count. Any value other than 72 yields a
    /// non-standard, non-interoperable digest.
    pub rounds: usize,
}

impl Skein512Params {
    /// Parameters for plain hashing with the given digest length.
    pub fn with_output_bits(output_bits: usize) -> Self {
        Self {
            output_bits,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.output_bits == 0 || self.output_bits > MAX_OUTPUT_BITS {
            return Err(SkeinError::BadHashLen);
        }

        self.tree.validate()?;
        validate_rounds(self.rounds)?;

        Ok(())
    }
}

impl Default for Skein512Params {
    /// 512-bit digest, sequential, no optional inputs, 72 rounds.
    fn default() -> Self {
        Self {
            output_bits: 512,
            tree: TreeInfo::SEQUENTIAL,
            key: None,
            personalization: None,
            public_key: None,
            key_identifier: None,
            nonce: None,
            rounds: STANDARD_ROUNDS,
        }
    }
}
