//! Skein-512 incremental hashing
//!
//! This module implements the Skein-512 state machine: configuration,
//! incremental message absorption, final-block padding and the output
//! stage. It provides:
//!
//! - [`Skein512`]: the hash context (`init`, `update`, `finalize`, and
//!   the tree-mode split `final_pad` / `output`)
//! - one-shot helpers for plain hashing, MAC and key derivation
//!
//! A configured context can be cloned before any message byte is
//! absorbed; the clone starts from the same chaining value without
//! recomputing the configuration or key passes.

use core::fmt;

use zeroize::Zeroize;

use super::config::{CONFIG_BYTES, Skein512Params, TreeInfo, config_block};
use super::tweak::{BlockType, Tweak};
use super::ubi::{process_blocks, ubi_pass};
use super::{BLOCK_BYTES, STATE_WORDS};
use crate::cipher::threefish512::STANDARD_ROUNDS;
use crate::error::{Result, SkeinError};
use crate::observer::{NoObserver, Observer};
use crate::primitives::{words_from_le_bytes, words_to_le_bytes};

/// Lifecycle of a [`Skein512`] context.
///
/// A context only exists once it has been configured, so there is no
/// uninitialized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Configured, no message byte absorbed yet.
    Configured,
    /// At least one `update` call has been made.
    Accumulating,
    /// The final message block has been processed; only `output` remains.
    Padded,
    /// A digest has been produced.
    Finalized,
}

/// Skein-512 hash context.
///
/// `O` receives intermediate values (see [`crate::observer`]); the
/// default [`NoObserver`] costs nothing.
pub struct Skein512<O: Observer = NoObserver> {
    /// Digest length in bits.
    output_bits: usize,
    /// Bytes waiting in `buffer`, `0..=64`.
    buffered: usize,
    /// Tweak of the block that will be processed next.
    tweak: Tweak,
    /// Running chaining value; the key of the next Threefish call.
    chain: [u64; STATE_WORDS],
    /// Partial block buffer.
    buffer: [u8; BLOCK_BYTES],
    phase: Phase,
    rounds: usize,
    observer: O,
}

impl Skein512 {
    /// Configures a context for plain hashing with an `output_bits`-bit
    /// digest.
    ///
    /// # Parameters
    /// - `output_bits`: Digest length in bits, `1..=MAX_OUTPUT_BITS`
    ///
    /// # Returns
    /// - A context in [`Phase::Configured`], ready for `update`
    ///
    /// # Errors
    /// [`SkeinError::BadHashLen`] if `output_bits` is zero or above
    /// [`MAX_OUTPUT_BITS`](super::config::MAX_OUTPUT_BITS).
    ///
    /// # Notes
    /// - Runs exactly one UBI pass (the configuration block) from an
    ///   all-zero chaining value.
    /// - Clone the result to hash many messages under the same
    ///   configuration without repeating that pass.
    pub fn new(output_bits: usize) -> Result<Self> {
        Self::with_params(&Skein512Params::with_output_bits(output_bits))
    }

    /// Extended initialization: optional MAC/KDF key and tree layout.
    ///
    /// With an empty key and [`TreeInfo::SEQUENTIAL`] this is identical
    /// to [`Skein512::new`].
    pub fn new_ext(output_bits: usize, tree: TreeInfo, key: &[u8]) -> Result<Self> {
        let params = Skein512Params {
            output_bits,
            tree,
            key: Some(key.to_vec()),
            ..Skein512Params::default()
        };

        Self::with_params(&params)
    }

    /// Configures a context from a full parameter set.
    pub fn with_params(params: &Skein512Params) -> Result<Self> {
        Self::with_observer(params, NoObserver)
    }
}

impl<O: Observer> Skein512<O> {
    /// Configures a context that reports to `observer`.
    ///
    /// Runs the key pass (if any) from an all-zero chaining value, then
    /// the configuration pass, then each remaining optional input.
    pub fn with_observer(params: &Skein512Params, observer: O) -> Result<Self> {
        params.validate()?;

        let rounds = params.rounds;
        let mut chain = [0u64; STATE_WORDS];

        let key = non_empty(&params.key);
        if let Some(key) = key {
            ubi_pass(&mut chain, BlockType::Key, key, rounds, &observer)?;
        }

        let cfg = config_block(params.output_bits, params.tree);
        let mut tweak = Tweak::start(BlockType::Config);
        tweak.set_final(true);
        process_blocks(&mut chain, &mut tweak, &cfg, CONFIG_BYTES, rounds, &observer)?;

        let extras = [
            (BlockType::Personalization, non_empty(&params.personalization)),
            (BlockType::PublicKey, non_empty(&params.public_key)),
            (BlockType::KeyIdentifier, non_empty(&params.key_identifier)),
            (BlockType::Nonce, non_empty(&params.nonce)),
        ];

        for (block_type, input) in extras {
            if let Some(input) = input {
                ubi_pass(&mut chain, block_type, input, rounds, &observer)?;
            }
        }

        tracing::debug!(
            output_bits = params.output_bits,
            tree = ?params.tree,
            keyed = key.is_some(),
            extras = extras.iter().filter(|(_, input)| input.is_some()).count(),
            rounds,
            "skein-512 context configured"
        );

        Ok(Self {
            output_bits: params.output_bits,
            buffered: 0,
            tweak: Tweak::start(BlockType::Message),
            chain,
            buffer: [0u8; BLOCK_BYTES],
            phase: Phase::Configured,
            rounds,
            observer,
        })
    }

    /// Absorbs message bytes.
    ///
    /// # Parameters
    /// - `msg`: Next slice of the message, of any length
    ///
    /// # Errors
    /// - [`SkeinError::Finalized`] once `final_pad` or `finalize` has run
    /// - [`SkeinError::PositionOverflow`] if the message would pass the
    ///   96-bit byte counter; the context is left unchanged
    ///
    /// # Notes
    /// - Full blocks are compressed as soon as more input is known to
    ///   follow them.
    /// - The last block of input always stays buffered so the final flag
    ///   can be attached to it.
    /// - An empty `msg` is a no-op and does not leave
    ///   [`Phase::Configured`].
    pub fn update(&mut self, mut msg: &[u8]) -> Result<()> {
        self.ensure_open()?;

        if msg.is_empty() {
            return Ok(());
        }

        // Every byte absorbed now is counted by the final block at the latest
        let pending = (self.buffered + msg.len()) as u128;
        if pending > Tweak::MAX_POSITION - self.tweak.position() {
            return Err(SkeinError::PositionOverflow);
        }

        self.phase = Phase::Accumulating;

        if self.buffered + msg.len() > BLOCK_BYTES {
            // Complete and flush the partial block
            if self.buffered > 0 {
                let n = BLOCK_BYTES - self.buffered;
                self.buffer[self.buffered..].copy_from_slice(&msg[..n]);
                msg = &msg[n..];

                process_blocks(
                    &mut self.chain,
                    &mut self.tweak,
                    &self.buffer,
                    BLOCK_BYTES,
                    self.rounds,
                    &self.observer,
                )?;
                self.buffered = 0;
            }

            // Process whole blocks, keeping the last one back
            if msg.len() > BLOCK_BYTES {
                let whole = (msg.len() - 1) / BLOCK_BYTES * BLOCK_BYTES;

                process_blocks(
                    &mut self.chain,
                    &mut self.tweak,
                    &msg[..whole],
                    BLOCK_BYTES,
                    self.rounds,
                    &self.observer,
                )?;
                msg = &msg[whole..];
            }
        }

        self.buffer[self.buffered..self.buffered + msg.len()].copy_from_slice(msg);
        self.buffered += msg.len();

        Ok(())
    }

    /// Finishes the message and writes the digest into `out`.
    ///
    /// # Parameters
    /// - `out`: Destination buffer, at least [`Skein512::output_bytes`]
    ///   long
    ///
    /// # Returns
    /// - The number of bytes written at the front of `out`
    ///
    /// # Errors
    /// - [`SkeinError::Finalized`] if the context was already finished
    /// - [`SkeinError::OutputTooShort`] if `out` is too small; nothing is
    ///   written and the context is unchanged
    ///
    /// # Notes
    /// - Bits past `output_bits` in the last byte are left as produced.
    /// - Bytes of `out` past the digest are not touched.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        self.ensure_open()?;
        let needed = self.check_output_len(out.len())?;

        // Pad and compress the last message block
        self.process_final_block()?;

        // Squeeze the digest from the final chaining value
        self.squeeze(&mut out[..needed])?;
        self.phase = Phase::Finalized;

        tracing::trace!(output_bits = self.output_bits, "skein-512 digest produced");

        Ok(needed)
    }

    /// Finishes the message and returns the digest.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.output_bytes()];
        self.finalize_into(&mut out)?;
        Ok(out)
    }

    /// Processes the final message block without running the output
    /// stage and returns the resulting chaining value (the node result
    /// of a tree hash).
    ///
    /// Call [`Skein512::output`] afterwards to squeeze a digest from it.
    pub fn final_pad(&mut self) -> Result<[u8; BLOCK_BYTES]> {
        self.ensure_open()?;
        self.process_final_block()?;

        Ok(words_to_le_bytes(&self.chain))
    }

    /// Runs only the output stage on a padded context.
    ///
    /// May be repeated: the chaining value is not consumed, so each call
    /// yields the same digest.
    ///
    /// # Errors
    /// - [`SkeinError::NotPadded`] before `final_pad` (or `finalize`)
    /// - [`SkeinError::OutputTooShort`] if `out` is too small
    pub fn output_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if !matches!(self.phase, Phase::Padded | Phase::Finalized) {
            return Err(SkeinError::NotPadded);
        }

        let needed = self.check_output_len(out.len())?;

        self.squeeze(&mut out[..needed])?;
        self.phase = Phase::Finalized;

        Ok(needed)
    }

    /// Runs only the output stage and returns the digest.
    pub fn output(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.output_bytes()];
        self.output_into(&mut out)?;
        Ok(out)
    }

    /// Tags the message pass with a tree level (0 = sequential, leaves
    /// are level 1). Levels separate leaf and interior-node hashes of the
    /// same bytes.
    ///
    /// # Errors
    /// - [`SkeinError::TreeLevelOutOfRange`] above 127
    /// - [`SkeinError::MessageStarted`] once a message byte was absorbed
    /// - [`SkeinError::Finalized`] once the final block has been processed
    pub fn set_tree_level(&mut self, level: u8) -> Result<()> {
        self.ensure_configured()?;
        self.tweak.set_tree_level(level)
    }

    /// Sets the starting byte position of the message pass, i.e. the
    /// offset of this node's data within its tree level.
    ///
    /// # Errors
    /// - [`SkeinError::MessageStarted`] once a message byte was absorbed
    /// - [`SkeinError::Finalized`] once the final block has been processed
    /// - [`SkeinError::PositionOverflow`] beyond the 96-bit counter
    pub fn set_position(&mut self, position: u128) -> Result<()> {
        self.ensure_configured()?;
        self.tweak.set_position(position)
    }

    /// Installs a combined node result as the chaining value and moves
    /// the context to [`Phase::Padded`], ready for [`Skein512::output`].
    pub fn load_node_result(&mut self, node: &[u8; BLOCK_BYTES]) {
        self.chain = words_from_le_bytes(node);
        self.buffered = 0;
        self.buffer.zeroize();
        self.phase = Phase::Padded;
    }

    /// Digest length in bits.
    pub fn output_bits(&self) -> usize {
        self.output_bits
    }

    /// Digest length in bytes, `ceil(output_bits / 8)`.
    pub fn output_bytes(&self) -> usize {
        self.output_bits.div_ceil(8)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Tweak of the next message block.
    pub fn tweak(&self) -> Tweak {
        self.tweak
    }

    /// Bytes waiting in the partial-block buffer.
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Current chaining value as 64 little-endian bytes.
    pub fn chaining_value(&self) -> [u8; BLOCK_BYTES] {
        words_to_le_bytes(&self.chain)
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Whether this context computes the standard (72-round) Skein-512.
    pub fn is_standard(&self) -> bool {
        self.rounds == STANDARD_ROUNDS
    }

    fn ensure_open(&self) -> Result<()> {
        match self.phase {
            Phase::Configured | Phase::Accumulating => Ok(()),
            Phase::Padded | Phase::Finalized => Err(SkeinError::Finalized),
        }
    }

    fn ensure_configured(&self) -> Result<()> {
        match self.phase {
            Phase::Configured => Ok(()),
            Phase::Accumulating => Err(SkeinError::MessageStarted),
            Phase::Padded | Phase::Finalized => Err(SkeinError::Finalized),
        }
    }

    fn check_output_len(&self, got: usize) -> Result<usize> {
        let needed = self.output_bytes();

        if got < needed {
            return Err(SkeinError::OutputTooShort { needed, got });
        }

        Ok(needed)
    }

    /// Zero-pads the buffered tail and compresses it with `FINAL` set.
    /// Works on copies of the tweak and chaining value, committed only
    /// once the block went through.
    fn process_final_block(&mut self) -> Result<()> {
        let tail = self.buffered;

        let mut tweak = self.tweak;
        tweak.set_final(true);

        let mut block = self.buffer;
        block[tail..].fill(0);

        let mut chain = self.chain;
        let result = process_blocks(&mut chain, &mut tweak, &block, tail, self.rounds, &self.observer);
        block.zeroize();

        if let Err(err) = result {
            chain.zeroize();
            return Err(err);
        }

        self.chain = chain;
        self.tweak = tweak;
        chain.zeroize();

        self.buffered = 0;
        self.buffer.zeroize();
        self.phase = Phase::Padded;

        Ok(())
    }

    /// Output stage: for block counter i = 0, 1, ... run an OUT pass over
    /// the 8-byte little-endian counter, keyed by the saved chaining value,
    /// and emit up to 64 bytes of the result.
    fn squeeze(&self, out: &mut [u8]) -> Result<()> {
        for (counter, chunk) in out.chunks_mut(BLOCK_BYTES).enumerate() {
            let counter = counter as u64;

            let mut block = [0u8; BLOCK_BYTES];
            block[..8].copy_from_slice(&counter.to_le_bytes());

            let mut chain = self.chain;
            let mut tweak = Tweak::start(BlockType::Output);
            tweak.set_final(true);

            process_blocks(&mut chain, &mut tweak, &block, 8, self.rounds, &self.observer)?;

            let mut bytes = words_to_le_bytes(&chain);
            chunk.copy_from_slice(&bytes[..chunk.len()]);
            bytes.zeroize();
            chain.zeroize();

            self.observer.on_output(counter, chunk);
        }

        Ok(())
    }
}

impl<O: Observer + Clone> Clone for Skein512<O> {
    fn clone(&self) -> Self {
        Self {
            output_bits: self.output_bits,
            buffered: self.buffered,
            tweak: self.tweak,
            chain: self.chain,
            buffer: self.buffer,
            phase: self.phase,
            rounds: self.rounds,
            observer: self.observer.clone(),
        }
    }
}

impl<O: Observer> fmt::Debug for Skein512<O> {
    /// Omits the chaining value and buffer, which are secret in MAC mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skein512")
            .field("output_bits", &self.output_bits)
            .field("buffered", &self.buffered)
            .field("tweak", &self.tweak)
            .field("phase", &self.phase)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

impl<O: Observer> Drop for Skein512<O> {
    fn drop(&mut self) {
        self.chain.zeroize();
        self.buffer.zeroize();
    }
}

fn non_empty(input: &Option<Vec<u8>>) -> Option<&[u8]> {
    input.as_deref().filter(|bytes| !bytes.is_empty())
}

/// Computes the Skein-512 digest of `input` with an `output_bits`-bit
/// result.
///
/// # Example
///
/// ```rust
/// use skein::hash::skein512;
///
/// let digest = skein512(512, b"abc").unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
pub fn skein512(output_bits: usize, input: &[u8]) -> Result<Vec<u8>> {
    let mut ctx = Skein512::new(output_bits)?;
    ctx.update(input)?;
    ctx.finalize()
}

/// Computes Skein-MAC: `key` is absorbed before the configuration block.
pub fn skein512_mac(key: &[u8], output_bits: usize, input: &[u8]) -> Result<Vec<u8>> {
    let mut ctx = Skein512::new_ext(output_bits, TreeInfo::SEQUENTIAL, key)?;
    ctx.update(input)?;
    ctx.finalize()
}

/// Derives `output_bits` of key material from `master` and a key
/// identifier, using the Key and KeyIdentifier inputs with an empty
/// message.
pub fn derive_key(master: &[u8], identifier: &[u8], output_bits: usize) -> Result<Vec<u8>> {
    let params = Skein512Params {
        output_bits,
        key: Some(master.to_vec()),
        key_identifier: Some(identifier.to_vec()),
        ..Skein512Params::default()
    };

    Skein512::with_params(&params)?.finalize()
}
