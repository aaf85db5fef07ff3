//! UBI tweak words
//!
//! Every UBI block is encrypted under a 128-bit tweak that records how
//! many bytes have been processed so far and what role the block plays.
//! On the wire the tweak is two little-endian 64-bit words:
//!
//! ```text
//! bits   0..=95   position (bytes processed, including this block)
//! bits 112..=118  tree level
//! bit  119        BIT_PAD
//! bits 120..=125  block type
//! bit  126        FIRST
//! bit  127        FINAL
//! ```
//!
//! [`Tweak`] keeps these as typed fields and only packs them when a block
//! is encrypted, so an unknown block type or an oversized tree level
//! cannot be represented.

use crate::error::{Result, SkeinError};

// Field positions inside the second tweak word (bit - 64).
const POS_TREE_LEVEL: u32 = 48;
const POS_BIT_PAD: u32 = 55;
const POS_BLOCK_TYPE: u32 = 56;
const POS_FIRST: u32 = 62;
const POS_FINAL: u32 = 63;

const TREE_LEVEL_MASK: u64 = 0x7F;
const BLOCK_TYPE_MASK: u64 = 0x3F;
const POSITION_HIGH_MASK: u64 = 0xFFFF_FFFF;

/// Largest tree level the 7-bit field can carry.
pub const MAX_TREE_LEVEL: u8 = 0x7F;

/// Role of a UBI pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    /// MAC or KDF key.
    Key = 0,
    /// Configuration block.
    Config = 4,
    /// Personalization string.
    Personalization = 8,
    /// Public key, for signature hashing.
    PublicKey = 12,
    /// Key identifier, for KDF use.
    KeyIdentifier = 16,
    /// Nonce, for stream cipher and PRNG use.
    Nonce = 20,
    /// Message data.
    Message = 48,
    /// Output stage.
    Output = 63,
}

impl BlockType {
    /// 6-bit code stored in the tweak.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a tweak type code.
    pub fn from_code(code: u8) -> Result<Self> {
        Ok(match code {
            0 => BlockType::Key,
            4 => BlockType::Config,
            8 => BlockType::Personalization,
            12 => BlockType::PublicKey,
            16 => BlockType::KeyIdentifier,
            20 => BlockType::Nonce,
            48 => BlockType::Message,
            63 => BlockType::Output,
            other => return Err(SkeinError::UnknownBlockType(other)),
        })
    }
}

/// Typed view of the two tweak words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tweak {
    position: u128,
    block_type: BlockType,
    tree_level: u8,
    first: bool,
    last: bool,
    bit_pad: bool,
}

impl Tweak {
    /// Largest position the 96-bit counter can hold.
    pub const MAX_POSITION: u128 = (1u128 << 96) - 1;

    /// Tweak for the first block of a new UBI pass: position zero,
    /// `FIRST` set, tree level zero.
    pub const fn start(block_type: BlockType) -> Self {
        Self {
            position: 0,
            block_type,
            tree_level: 0,
            first: true,
            last: false,
            bit_pad: false,
        }
    }

    /// Decodes a packed tweak.
    ///
    /// # Errors
    /// [`SkeinError::UnknownBlockType`] if the type field holds an
    /// undefined code. The reserved bits 96..=111 are ignored.
    pub fn from_words(words: [u64; 2]) -> Result<Self> {
        let t1 = words[1];
        let block_type = BlockType::from_code(((t1 >> POS_BLOCK_TYPE) & BLOCK_TYPE_MASK) as u8)?;

        Ok(Self {
            position: words[0] as u128 | (((t1 & POSITION_HIGH_MASK) as u128) << 64),
            block_type,
            tree_level: ((t1 >> POS_TREE_LEVEL) & TREE_LEVEL_MASK) as u8,
            first: (t1 >> POS_FIRST) & 1 == 1,
            last: (t1 >> POS_FINAL) & 1 == 1,
            bit_pad: (t1 >> POS_BIT_PAD) & 1 == 1,
        })
    }

    /// Packs the tweak into the two words handed to Threefish.
    pub fn words(&self) -> [u64; 2] {
        let t1 = ((self.position >> 64) as u64 & POSITION_HIGH_MASK)
            | ((self.tree_level as u64) << POS_TREE_LEVEL)
            | ((self.bit_pad as u64) << POS_BIT_PAD)
            | ((self.block_type.code() as u64) << POS_BLOCK_TYPE)
            | ((self.first as u64) << POS_FIRST)
            | ((self.last as u64) << POS_FINAL);

        [self.position as u64, t1]
    }

    /// Bytes processed so far in this pass.
    pub fn position(&self) -> u128 {
        self.position
    }

    /// Overwrites the byte counter.
    ///
    /// # Errors
    /// [`SkeinError::PositionOverflow`] above [`Tweak::MAX_POSITION`].
    pub fn set_position(&mut self, position: u128) -> Result<()> {
        if position > Self::MAX_POSITION {
            return Err(SkeinError::PositionOverflow);
        }

        self.position = position;
        Ok(())
    }

    /// Adds `bytes` to the counter.
    pub(crate) fn advance(&mut self, bytes: usize) -> Result<()> {
        let next = self
            .position
            .checked_add(bytes as u128)
            .ok_or(SkeinError::PositionOverflow)?;

        self.set_position(next)
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn tree_level(&self) -> u8 {
        self.tree_level
    }

    /// Sets the tree level of the pass.
    ///
    /// # Errors
    /// [`SkeinError::TreeLevelOutOfRange`] above [`MAX_TREE_LEVEL`].
    pub fn set_tree_level(&mut self, level: u8) -> Result<()> {
        if level > MAX_TREE_LEVEL {
            return Err(SkeinError::TreeLevelOutOfRange(level));
        }

        self.tree_level = level;
        Ok(())
    }

    pub fn is_first(&self) -> bool {
        self.first
    }

    pub fn set_first(&mut self, first: bool) {
        self.first = first;
    }

    pub fn is_final(&self) -> bool {
        self.last
    }

    pub fn set_final(&mut self, last: bool) {
        self.last = last;
    }

    pub fn is_bit_pad(&self) -> bool {
        self.bit_pad
    }

    pub fn set_bit_pad(&mut self, bit_pad: bool) {
        self.bit_pad = bit_pad;
    }
}
