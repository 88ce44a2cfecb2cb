use std::collections::HashMap;

use dtjit_tree::DecisionTree;

/// Partial `{bit_offset -> outcome}` assignment identifying one subtree
/// exit: the compare outcome required, at each internal node the exit's
/// path touches, to reach it. Nodes the path never visits are absent.
pub type PathBitsMap = HashMap<u8, bool>;

/// One exit of a subtree: the full-tree index execution transitions to, and
/// the path that reaches it.
#[derive(Debug, Clone)]
pub struct Exit {
    pub target_idx: u64,
    pub path: PathBitsMap,
}

/// Enumerates a subtree's `2^L` exits, in the order this recursive
/// algorithm produces them: for the subtree rooted at
/// `root_idx`, recurse into the true child first, mark every exit just
/// produced with `bit_offset(current) = true`, then do the same for the
/// false child with `false`. This interleaving is what lets the IR
/// Emitter lay out basic blocks so that the `default` case's fallthrough
/// is well-defined.
///
/// `bit_offset` must map every full-tree index inside the subtree (as
/// produced by [`crate::partition::subtree_node_indices`]) to its bit
/// offset.
pub fn enumerate_exits(
    tree: &DecisionTree,
    root_idx: u64,
    subtree_levels: u8,
    bit_offset: &HashMap<u64, u8>,
) -> Vec<Exit> {
    enumerate_recursive(tree, root_idx, subtree_levels, bit_offset)
}

fn enumerate_recursive(
    tree: &DecisionTree,
    node_idx: u64,
    remaining: u8,
    bit_offset: &HashMap<u64, u8>,
) -> Vec<Exit> {
    if remaining == 0 {
        return vec![Exit {
            target_idx: node_idx,
            path: PathBitsMap::new(),
        }];
    }

    let node = tree.node(node_idx);
    let offset = bit_offset[&node_idx];

    let mut exits = enumerate_recursive(tree, node.true_child_idx, remaining - 1, bit_offset);
    for exit in &mut exits {
        exit.path.insert(offset, true);
    }

    let mut false_exits = enumerate_recursive(tree, node.false_child_idx, remaining - 1, bit_offset);
    for exit in &mut false_exits {
        exit.path.insert(offset, false);
    }

    exits.extend(false_exits);
    exits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::subtree_node_indices;
    use dtjit_tree::TreeNode;

    fn sample_tree() -> DecisionTree {
        DecisionTree::new(vec![
            TreeNode { feature_index: 0, bias: 0.5, true_child_idx: 1, false_child_idx: 2 },
            TreeNode { feature_index: 1, bias: 0.25, true_child_idx: 3, false_child_idx: 4 },
            TreeNode { feature_index: 1, bias: 0.75, true_child_idx: 5, false_child_idx: 6 },
        ])
        .unwrap()
    }

    fn bit_offsets(node_indices: &[u64]) -> HashMap<u64, u8> {
        node_indices
            .iter()
            .enumerate()
            .map(|(i, &idx)| (idx, i as u8))
            .collect()
    }

    #[test]
    fn whole_tree_as_one_subtree_l2() {
        let tree = sample_tree();
        let node_indices = subtree_node_indices(0, 2);
        let offsets = bit_offsets(&node_indices);
        let exits = enumerate_exits(&tree, 0, 2, &offsets);

        assert_eq!(exits.len(), 4);
        // True-first traversal order: node0=true(bit0=1) -> node1 -> true(bit1=1)=>3, false(bit1=0)=>4
        // then node0=false(bit0=0) -> node2 -> true(bit2=1)=>5, false(bit2=0)=>6
        let targets: Vec<u64> = exits.iter().map(|e| e.target_idx).collect();
        assert_eq!(targets, vec![3, 4, 5, 6]);

        assert_eq!(exits[0].path.get(&0), Some(&true));
        assert_eq!(exits[0].path.get(&1), Some(&true));
        assert_eq!(exits[1].path.get(&1), Some(&false));
        assert_eq!(exits[2].path.get(&0), Some(&false));
        assert_eq!(exits[2].path.get(&2), Some(&true));
    }

    #[test]
    fn l1_has_two_exits_one_bit_each() {
        let tree = sample_tree();
        let node_indices = subtree_node_indices(0, 1);
        let offsets = bit_offsets(&node_indices);
        let exits = enumerate_exits(&tree, 0, 1, &offsets);

        assert_eq!(exits.len(), 2);
        assert_eq!(exits[0].target_idx, 1);
        assert_eq!(exits[0].path, HashMap::from([(0, true)]));
        assert_eq!(exits[1].target_idx, 2);
        assert_eq!(exits[1].path, HashMap::from([(0, false)]));
    }
}
