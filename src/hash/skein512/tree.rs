//! Skein tree hashing
//!
//! The message is cut into leaves of `64 · 2^leaf_size_log2` bytes, each
//! hashed independently at tree level 1 with its tweak position starting
//! at the leaf's byte offset. The 64-byte leaf results are concatenated
//! and hashed again, `2^node_fanout_log2` results per node, one level
//! higher. Reduction stops once a single 64-byte result remains; if the
//! next level would reach `max_level`, the whole remaining level is
//! hashed as one node at `max_level` instead. The final result feeds the
//! ordinary output stage.
//!
//! Nodes within a level are independent. With the `parallel` feature
//! they are hashed on the rayon thread pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::BLOCK_BYTES;
use super::config::{Skein512Params, TreeInfo};
use super::core::Skein512;
use crate::error::{Result, SkeinError};
use crate::observer::{NoObserver, Observer};

/// Observers a [`TreeHasher`] can clone into every node. With the
/// `parallel` feature nodes run on the rayon pool, so the observer must
/// also be `Send + Sync`.
#[cfg(feature = "parallel")]
pub trait NodeObserver: Observer + Clone + Send + Sync {}

#[cfg(feature = "parallel")]
impl<T: Observer + Clone + Send + Sync> NodeObserver for T {}

/// Observers a [`TreeHasher`] can clone into every node.
#[cfg(not(feature = "parallel"))]
pub trait NodeObserver: Observer + Clone {}

#[cfg(not(feature = "parallel"))]
impl<T: Observer + Clone> NodeObserver for T {}

/// Tree-mode Skein-512 hasher.
///
/// Holds the configured context (key and configuration passes already
/// applied) and clones it for every node.
#[derive(Clone, Debug)]
pub struct TreeHasher<O: Observer = NoObserver> {
    template: Skein512<O>,
    tree: TreeInfo,
}

impl TreeHasher {
    /// Configures a tree hasher. With [`TreeInfo::SEQUENTIAL`] the
    /// hasher degrades to plain sequential hashing.
    pub fn new(params: &Skein512Params) -> Result<Self> {
        Self::with_observer(params, NoObserver)
    }
}

impl<O: NodeObserver> TreeHasher<O> {
    pub fn with_observer(params: &Skein512Params, observer: O) -> Result<Self> {
        Ok(Self {
            template: Skein512::with_observer(params, observer)?,
            tree: params.tree,
        })
    }

    pub fn tree(&self) -> TreeInfo {
        self.tree
    }

    /// Hashes `message` and returns the digest.
    #[tracing::instrument(
        name = "skein512_tree_hash",
        skip_all,
        fields(len = message.len(), tree = ?self.tree)
    )]
    pub fn hash(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut ctx = self.template.clone();

        if self.tree.is_sequential() {
            ctx.update(message)?;
            return ctx.finalize();
        }

        let root = self.root(message)?;
        ctx.load_node_result(&root);
        ctx.output()
    }

    /// Reduces `message` to the 64-byte root result.
    pub fn root(&self, message: &[u8]) -> Result<[u8; BLOCK_BYTES]> {
        let (leaf_bytes, node_bytes) = match (self.tree.leaf_bytes(), self.tree.node_bytes()) {
            (Some(leaf), Some(node)) if !self.tree.is_sequential() => (leaf, node),
            _ => return Err(SkeinError::InvalidTreeInfo("tree layout required")),
        };

        let mut level_data = self.hash_level(message, leaf_bytes, 1)?;
        let mut level = 1u8;

        while level_data.len() > BLOCK_BYTES {
            level += 1;

            if level == self.tree.max_level {
                level_data = self.hash_level(&level_data, level_data.len(), level)?;
                break;
            }

            level_data = self.hash_level(&level_data, node_bytes, level)?;
        }

        let mut root = [0u8; BLOCK_BYTES];
        root.copy_from_slice(&level_data);
        Ok(root)
    }

    /// Hashes one level: `data` is split into nodes of `node_bytes`, and
    /// the node results are concatenated in order.
    fn hash_level(&self, data: &[u8], node_bytes: usize, level: u8) -> Result<Vec<u8>> {
        tracing::trace!(level, len = data.len(), node_bytes, "hashing tree level");

        if data.is_empty() {
            return Ok(self.hash_node(0, data, level)?.to_vec());
        }

        #[cfg(feature = "parallel")]
        let nodes: Vec<[u8; BLOCK_BYTES]> = data
            .par_chunks(node_bytes)
            .enumerate()
            .map(|(index, chunk)| self.hash_node(index as u128 * node_bytes as u128, chunk, level))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let nodes: Vec<[u8; BLOCK_BYTES]> = data
            .chunks(node_bytes)
            .enumerate()
            .map(|(index, chunk)| self.hash_node(index as u128 * node_bytes as u128, chunk, level))
            .collect::<Result<_>>()?;

        Ok(nodes.concat())
    }

    fn hash_node(&self, offset: u128, chunk: &[u8], level: u8) -> Result<[u8; BLOCK_BYTES]> {
        let mut node = self.template.clone();

        node.set_tree_level(level)?;
        node.set_position(offset)?;
        node.update(chunk)?;
        node.final_pad()
    }
}
