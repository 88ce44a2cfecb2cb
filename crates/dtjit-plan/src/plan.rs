use std::collections::HashMap;

use dtjit_tree::DecisionTree;

use crate::{partition, paths, variants};

/// One subtree exit together with the condition-vector variants that must
/// switch to it.
#[derive(Debug, Clone)]
pub struct ExitPlan {
    pub target_idx: u64,
    pub variants: Vec<u32>,
}

/// Everything the IR Emitter needs to know about one compiled subtree:
/// which full-tree nodes it gathers from (in bit-offset order) and which
/// condition-vector variants switch to which exit.
#[derive(Debug, Clone)]
pub struct SubtreePlan {
    pub root_idx: u64,
    pub levels: u8,
    /// Full-tree indices of the subtree's internal nodes, in bit-offset order.
    pub node_indices: Vec<u64>,
    /// The subtree's exits, in Path Enumerator order (used as the textual
    /// basic-block order by the IR Emitter).
    pub exits: Vec<ExitPlan>,
}

impl SubtreePlan {
    pub fn build(tree: &DecisionTree, root_idx: u64, levels: u8) -> Self {
        let node_indices = partition::subtree_node_indices(root_idx, levels);
        let bit_offset: HashMap<u64, u8> = node_indices
            .iter()
            .enumerate()
            .map(|(i, &idx)| (idx, i as u8))
            .collect();

        let exits = paths::enumerate_exits(tree, root_idx, levels, &bit_offset)
            .into_iter()
            .map(|exit| ExitPlan {
                target_idx: exit.target_idx,
                variants: variants::canonical_variants(&exit.path, levels),
            })
            .collect();

        Self {
            root_idx,
            levels,
            node_indices,
            exits,
        }
    }

    /// Number of internal nodes in the subtree, `2^L - 1`.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_indices.len()
    }

    /// The bit offset of `full_tree_idx` within this subtree, if it belongs to it.
    pub fn bit_offset(&self, full_tree_idx: u64) -> Option<u8> {
        self.node_indices
            .iter()
            .position(|&idx| idx == full_tree_idx)
            .map(|pos| pos as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtjit_tree::TreeNode;

    #[test]
    fn builds_consistent_plan_for_whole_tree() {
        let tree = DecisionTree::new(vec![
            TreeNode { feature_index: 0, bias: 0.5, true_child_idx: 1, false_child_idx: 2 },
            TreeNode { feature_index: 1, bias: 0.25, true_child_idx: 3, false_child_idx: 4 },
            TreeNode { feature_index: 1, bias: 0.75, true_child_idx: 5, false_child_idx: 6 },
        ])
        .unwrap();

        let plan = SubtreePlan::build(&tree, 0, 2);
        assert_eq!(plan.node_indices, vec![0, 1, 2]);
        assert_eq!(plan.exits.len(), 4);
        assert_eq!(plan.bit_offset(1), Some(1));
        assert_eq!(plan.bit_offset(99), None);

        let total_variants: usize = plan.exits.iter().map(|e| e.variants.len()).sum();
        assert_eq!(total_variants, 1 << plan.node_count());
    }
}
