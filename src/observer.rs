//! Instrumentation hooks
//!
//! Intermediate values of Threefish and UBI are reported through the
//! [`Observer`] trait, injected when a context or cipher call is made.
//! Every method has an empty default body, so [`NoObserver`] compiles down
//! to nothing.
//!
//! Callouts happen at fixed points:
//!
//! - `on_round`: after every fourth Threefish round (each subkey-injection
//!   point), with the state in natural word order
//! - `on_block`: after each UBI block has been compressed
//! - `on_output`: after each output-stage block has been squeezed

use crate::hash::skein512::Tweak;

/// Snapshot of one UBI compression step.
#[derive(Debug, Clone, Copy)]
pub struct BlockEvent<'a> {
    /// Tweak the block was encrypted under.
    pub tweak: Tweak,
    /// Chaining value used as the Threefish key.
    pub chaining_in: &'a [u64; 8],
    /// Plaintext block (already zero-padded).
    pub block: &'a [u64; 8],
    /// Chaining value after the feed-forward.
    pub chaining_out: &'a [u64; 8],
}

/// Receives intermediate values from Threefish and UBI.
pub trait Observer {
    /// Called with the cipher state after `rounds_done` rounds, where
    /// `rounds_done` is a multiple of 4.
    fn on_round(&self, _rounds_done: usize, _state: &[u64; 8]) {}

    /// Called once per compressed UBI block.
    fn on_block(&self, _event: &BlockEvent<'_>) {}

    /// Called once per output-stage block with the bytes handed to the
    /// caller (the last one may be shorter than 64 bytes).
    fn on_output(&self, _counter: u64, _bytes: &[u8]) {}
}

/// The default observer: ignores everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoObserver;

impl Observer for NoObserver {}

/// Forwards every callout to `tracing` at TRACE level.
///
/// Chaining values are key material in MAC mode; only enable this
/// observer in diagnostics builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_round(&self, rounds_done: usize, state: &[u64; 8]) {
        tracing::trace!(target: "skein::round", rounds_done, ?state);
    }

    fn on_block(&self, event: &BlockEvent<'_>) {
        tracing::trace!(
            target: "skein::block",
            block_type = ?event.tweak.block_type(),
            position = %event.tweak.position(),
            first = event.tweak.is_first(),
            last = event.tweak.is_final(),
            tree_level = event.tweak.tree_level(),
            chaining_out = ?event.chaining_out,
        );
    }

    fn on_output(&self, counter: u64, bytes: &[u8]) {
        tracing::trace!(target: "skein::output", counter, len = bytes.len());
    }
}

impl<O: Observer + ?Sized> Observer for &O {
    fn on_round(&self, rounds_done: usize, state: &[u64; 8]) {
        (**self).on_round(rounds_done, state);
    }

    fn on_block(&self, event: &BlockEvent<'_>) {
        (**self).on_block(event);
    }

    fn on_output(&self, counter: u64, bytes: &[u8]) {
        (**self).on_output(counter, bytes);
    }
}
