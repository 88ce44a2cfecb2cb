//! The in-memory perfect binary decision tree evaluated by the JIT, and a
//! reference (non-compiled) interpreter for it used as an oracle in tests.
mod error;
pub mod levels;

pub use error::{Error, Result};

/// One internal split node: compare `feature[feature_index] > bias`, follow
/// `true_child_idx` or `false_child_idx` accordingly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeNode {
    pub feature_index: u32,
    pub bias: f32,
    pub true_child_idx: u64,
    pub false_child_idx: u64,
}

/// A complete binary decision tree, stored as a flat array of [`TreeNode`] in
/// breadth-first order. `nodes.len() == 2^D - 1` for tree depth `D`; indices
/// `[nodes.len(), 2 * nodes.len() + 1)` are leaf exits.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Box<[TreeNode]>,
    depth: u8,
}

impl DecisionTree {
    /// Builds a tree from its flat node array, validating that the array
    /// describes a complete binary tree and that every child index is
    /// in-range.
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self> {
        let node_count = nodes.len() as u64;
        if !levels::is_complete_node_count(node_count) {
            return Err(Error::InvalidNodeCount(nodes.len()));
        }
        let depth = levels::depth_for_node_count(node_count);
        let leaf_exit_end = 2 * node_count + 1;

        for (idx, node) in nodes.iter().enumerate() {
            for child_idx in [node.true_child_idx, node.false_child_idx] {
                if child_idx == 0 || child_idx >= leaf_exit_end {
                    return Err(Error::ChildOutOfRange {
                        node_idx: idx as u64,
                        child_idx,
                    });
                }
            }
        }

        Ok(Self {
            nodes: nodes.into_boxed_slice(),
            depth,
        })
    }

    /// Tree depth `D`, i.e. `node_count() == 2^D - 1`.
    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Number of internal nodes, `N = 2^D - 1`.
    #[inline]
    pub fn node_count(&self) -> u64 {
        self.nodes.len() as u64
    }

    /// Number of leaf exits, `N + 1`.
    #[inline]
    pub fn leaf_count(&self) -> u64 {
        self.node_count() + 1
    }

    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// `true` iff `idx` is a leaf exit rather than an internal node.
    #[inline]
    pub fn is_leaf(&self, idx: u64) -> bool {
        idx >= self.node_count()
    }

    #[inline]
    pub fn node(&self, idx: u64) -> &TreeNode {
        &self.nodes[idx as usize]
    }

    /// Largest feature index referenced anywhere in the tree; callers
    /// should ensure data vectors are at least this long.
    pub fn max_feature_index(&self) -> u32 {
        self.nodes.iter().map(|n| n.feature_index).max().unwrap_or(0)
    }

    /// Reference interpreter: descend the tree node-by-node, starting at
    /// `start`, following `feature[idx] > bias` splits, until reaching a
    /// leaf exit. Used as an oracle for the compiled evaluators; never on
    /// the hot path.
    ///
    /// Feature values equal to the bias, and NaN feature values, both take
    /// the false branch (the split is a strict `>` compare).
    pub fn interpret(&self, start: u64, data: &[f32]) -> u64 {
        let mut idx = start;
        while !self.is_leaf(idx) {
            let node = self.node(idx);
            let value = data[node.feature_index as usize];
            idx = if value > node.bias {
                node.true_child_idx
            } else {
                node.false_child_idx
            };
        }
        idx
    }
}
