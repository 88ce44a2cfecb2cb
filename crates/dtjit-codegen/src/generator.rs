//! Polymorphism over code generators: a small trait with three
//! implementations selected by the CLI's `-L1/-L2/-L3` flags. All three build
//! the same switch-based IR from `crate::ir`; they differ only in the
//! subtree depth they switch over and the SIMD backend used to evaluate each
//! switch's condition vector.
use dtjit_simd::Backend;
use dtjit_tree::DecisionTree;

use crate::ir::{self, Switch};

/// A code generator capability set: which subtree depth to switch over, and
/// what SIMD backend to evaluate each switch's condition vector with.
pub trait Generator: Send + Sync {
    /// The subtree depth `L` this generator's switches are built at.
    fn subtree_levels(&self) -> u8;

    /// SIMD backend used to evaluate every switch's condition vector.
    fn backend(&self) -> Backend;

    /// Builds every compiled function's IR for `tree`, switching every
    /// `self.subtree_levels()` levels and nesting switches up to
    /// `function_depth`.
    fn emit_program(&self, tree: &DecisionTree, function_depth: u8) -> Vec<Switch> {
        ir::build_program(tree, function_depth, self.subtree_levels())
    }
}

/// `-L1`: a degenerate one-bit switch at every node, equivalent to a plain
/// if/else descent. No SIMD lane is wasted comparing more than one node at
/// once, so the scalar backend is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfThenElse;

impl Generator for IfThenElse {
    fn subtree_levels(&self) -> u8 {
        1
    }

    fn backend(&self) -> Backend {
        Backend::Scalar
    }
}

/// `-L2`: three-node subtree switches, evaluated with the portable scalar
/// kernel (no AVX dependency).
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeSwitch;

impl Generator for SubtreeSwitch {
    fn subtree_levels(&self) -> u8 {
        2
    }

    fn backend(&self) -> Backend {
        Backend::Scalar
    }
}

/// `-L3`: seven-node subtree switches packed into the full 8-lane condition
/// vector, evaluated with AVX when the host CPU supports it and falling back
/// to the scalar kernel otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeSwitchSimd;

impl Generator for SubtreeSwitchSimd {
    fn subtree_levels(&self) -> u8 {
        3
    }

    fn backend(&self) -> Backend {
        Backend::detect()
    }
}

/// Picks a generator by its `-Lx` CLI level (1, 2 or 3).
pub fn by_switch_level(level: u8) -> Box<dyn Generator> {
    match level {
        1 => Box::new(IfThenElse),
        2 => Box::new(SubtreeSwitch),
        _ => Box::new(SubtreeSwitchSimd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtjit_tree::TreeNode;

    /// A perfect binary tree of the given depth with BFS-contiguous child
    /// indices, used where the test only cares about IR shape, not outcomes.
    fn balanced_tree(depth: u8) -> DecisionTree {
        let node_count = (1u64 << depth) - 1;
        let nodes = (0..node_count)
            .map(|i| TreeNode {
                feature_index: (i % depth as u64) as u32,
                bias: 0.5,
                true_child_idx: 2 * i + 1,
                false_child_idx: 2 * i + 2,
            })
            .collect();
        DecisionTree::new(nodes).unwrap()
    }

    #[test]
    fn each_generator_produces_a_verifiable_program() {
        // D=6 is divisible by every supported switch level (1, 2, 3).
        let tree = balanced_tree(6);
        for generator in [by_switch_level(1), by_switch_level(2), by_switch_level(3)] {
            let function_depth = generator.subtree_levels();
            let program = generator.emit_program(&tree, function_depth);
            for switch in &program {
                ir::verify_switch(switch).unwrap();
            }
        }
    }
}
