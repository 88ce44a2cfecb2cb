//! The internal instruction set emitted for each subtree: a `Switch` gathers
//! its subtree's feature values and biases, computes a condition vector, and
//! dispatches on it to one of its exits. An exit either stores a full-tree
//! index directly (a leaf exit, or the root of the next compiled evaluator)
//! or nests another switch for the next `subtree_levels` of the tree, bounded
//! by `function_depth / subtree_levels`.
//!
//! This is the serializable form stored by the object cache; `crate::compile`
//! turns it into the closures the Resolver actually calls.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use dtjit_tree::DecisionTree;

use crate::error::{Error, Result};

/// One condition-vector value and the exit it switches to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchCase {
    pub variants: Vec<u32>,
    pub exit: Exit,
}

/// The payload of one subtree exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Exit {
    /// Store this full-tree index directly and return: either a leaf of the
    /// whole tree, or the root of the next compiled evaluator.
    Leaf(u64),
    /// Recurse into another switch rooted at this exit's node, still inside
    /// the same compiled function.
    Nested(Box<Switch>),
}

/// One emitted function body (or one nested layer within it): gather the
/// subtree's node values, compute the condition vector, switch on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Switch {
    pub root_idx: u64,
    pub levels: u8,
    /// `(feature_index, bias)` per internal node, in bit-offset order.
    pub node_feature_biases: Vec<(u32, f32)>,
    /// Shift mask per internal node, in bit-offset order: `1 << bit_offset`.
    pub shift_masks: Vec<i32>,
    pub cases: Vec<SwitchCase>,
}

impl Switch {
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_feature_biases.len()
    }
}

/// Builds the switch-based IR for the subtree rooted at `root_idx`, nesting
/// `remaining_nested` further `subtree_levels`-deep switches before the
/// function boundary.
pub fn build_switch(
    tree: &DecisionTree,
    root_idx: u64,
    subtree_levels: u8,
    remaining_nested: u8,
) -> Switch {
    let plan = dtjit_plan::SubtreePlan::build(tree, root_idx, subtree_levels);

    let node_feature_biases = plan
        .node_indices
        .iter()
        .map(|&idx| {
            let node = tree.node(idx);
            (node.feature_index, node.bias)
        })
        .collect();

    let shift_masks = (0..plan.node_count() as u32).map(|o| 1i32 << o).collect();

    let cases = plan
        .exits
        .iter()
        .map(|exit| {
            let payload = if tree.is_leaf(exit.target_idx) || remaining_nested == 0 {
                Exit::Leaf(exit.target_idx)
            } else {
                Exit::Nested(Box::new(build_switch(
                    tree,
                    exit.target_idx,
                    subtree_levels,
                    remaining_nested - 1,
                )))
            };
            SwitchCase {
                variants: exit.variants.clone(),
                exit: payload,
            }
        })
        .collect();

    Switch {
        root_idx,
        levels: subtree_levels,
        node_feature_biases,
        shift_masks,
        cases,
    }
}

/// Builds one `Switch` per compiled evaluator: one per node on every
/// `function_depth`-th level, each internally nesting `subtree_levels`-deep
/// switches down to the function boundary.
pub fn build_program(tree: &DecisionTree, function_depth: u8, subtree_levels: u8) -> Vec<Switch> {
    let remaining_nested = function_depth / subtree_levels - 1;
    let program: Vec<Switch> = dtjit_plan::partition::subtree_roots(tree.depth(), function_depth)
        .into_iter()
        .map(|root_idx| build_switch(tree, root_idx, subtree_levels, remaining_nested))
        .collect();
    debug_assert_eq!(
        program.len() as u64,
        dtjit_plan::partition::expected_evaluator_count(tree.depth(), function_depth),
        "emitted evaluator count diverged from the closed-form invariant (spec.md §8, invariant 1)"
    );
    tracing::debug!(
        tree_depth = tree.depth(),
        function_depth,
        subtree_levels,
        evaluators = program.len(),
        "emitted program"
    );
    program
}

/// Checks that a switch's cases partition its condition-vector universe
/// exactly once, recursing into nested switches. Corresponds to the
/// IR-verification step run before a program is compiled or cached.
pub fn verify_switch(switch: &Switch) -> Result<()> {
    let expected_node_count = (1usize << switch.levels) - 1;
    if switch.node_count() != expected_node_count {
        return Err(Error::NodeCountMismatch {
            root_idx: switch.root_idx,
            levels: switch.levels,
            node_count: switch.node_count(),
        });
    }

    let universe_size = 1u32 << switch.node_count();
    let mut seen = HashSet::with_capacity(universe_size as usize);
    for case in &switch.cases {
        for &variant in &case.variants {
            if !seen.insert(variant) {
                return Err(Error::SwitchNotPartitioned {
                    root_idx: switch.root_idx,
                    variant,
                });
            }
        }
        if let Exit::Nested(inner) = &case.exit {
            verify_switch(inner)?;
        }
    }

    if seen.len() != universe_size as usize {
        let missing = (0..universe_size).find(|v| !seen.contains(v)).unwrap_or(0);
        return Err(Error::SwitchNotPartitioned {
            root_idx: switch.root_idx,
            variant: missing,
        });
    }

    Ok(())
}
