use dtjit_tree::levels;

/// The full-tree indices of every subtree root: one per node on levels
/// `0, L, 2L, ..., D - L`.
///
/// Compiled evaluators are rooted at every `L`-th level of the tree.
pub fn subtree_roots(tree_depth: u8, subtree_levels: u8) -> Vec<u64> {
    let mut roots = Vec::new();
    let mut level = 0u8;
    while level < tree_depth {
        let first = levels::first_index_on_level(level);
        let count = levels::nodes_on_level(level);
        roots.extend(first..first + count);
        level += subtree_levels;
    }
    roots
}

/// `sum_{k=0}^{D/F - 1} 2^{kF}`, the number of compiled evaluators expected
/// for a tree of depth `D` compiled with function depth `F`: one evaluator
/// per node on levels `0, F, 2F, ..., D - F`, i.e.
/// `subtree_roots(tree_depth, function_depth).len()`.
///
/// Note this is parametric on the *function* depth, not the subtree-switch
/// depth: a compiled evaluator may internally nest several `L`-deep
/// switches (`build_program`'s `F > L` case), but it is still exactly one
/// evaluator per `F`-level boundary.
pub fn expected_evaluator_count(tree_depth: u8, function_depth: u8) -> u64 {
    let mut total = 0u64;
    let mut level = 0u8;
    while level < tree_depth {
        total += levels::nodes_on_level(level);
        level += function_depth;
    }
    total
}

/// The full-tree indices of a subtree's `2^L - 1` internal nodes, in
/// breadth-first order (root, then its two children, then their four
/// children, ...). A node's position in the returned vector is its bit
/// offset within the subtree's condition vector.
///
/// For BFS position
/// `i`, `level_i = floor(log2(i + 1))` is the node's level within the
/// subtree, and its full-tree index is `first_index_on_level(root_level +
/// level_i)` plus the root's offset on its own level (scaled by
/// `2^level_i`) plus `i`'s offset within its own subtree level.
pub fn subtree_node_indices(root_idx: u64, subtree_levels: u8) -> Vec<u64> {
    let root_level = levels::level_of(root_idx);
    let root_offset = root_idx - levels::first_index_on_level(root_level);
    let num_nodes = (1u64 << subtree_levels) - 1;

    (0..num_nodes)
        .map(|i| {
            // `i` is itself a 0-based BFS position, so the same level formula applies
            // relative to the subtree as it does relative to the full tree.
            let level_in_subtree = levels::level_of(i);

            let first_on_abs_level = levels::first_index_on_level(root_level + level_in_subtree);
            let nodes_per_root_child = levels::nodes_on_level(level_in_subtree);
            let first_subtree_idx_on_level =
                first_on_abs_level + root_offset * nodes_per_root_child;

            let offset_in_subtree_level = i - (levels::nodes_on_level(level_in_subtree) - 1);
            first_subtree_idx_on_level + offset_in_subtree_level
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_at_every_lth_level() {
        // D=6, L=3: roots on level 0 (1 node) and level 3 (8 nodes) = 9 roots.
        let roots = subtree_roots(6, 3);
        assert_eq!(roots.len(), 9);
        assert_eq!(roots[0], 0);
        assert_eq!(&roots[1..], &(7..15).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn expected_count_matches_invariant_1() {
        for (depth, function_depth) in [(2, 1), (2, 2), (6, 3), (6, 1), (6, 2)] {
            let expected: u64 = (0..depth / function_depth)
                .map(|k| 1u64 << (k * function_depth as u32))
                .sum();
            assert_eq!(expected_evaluator_count(depth, function_depth), expected);
        }
    }

    #[test]
    fn expected_count_matches_subtree_roots_len_for_f_greater_than_l() {
        // F=6, any L dividing it (e.g. L=3, two nested switch layers per
        // evaluator): the evaluator count only depends on F, not L.
        for function_depth in [1u8, 2, 3, 6] {
            assert_eq!(
                expected_evaluator_count(6, function_depth),
                subtree_roots(6, function_depth).len() as u64
            );
        }
    }

    #[test]
    fn single_subtree_root_is_whole_tree_when_d_eq_l() {
        // D=L=2: one subtree rooted at 0 covering nodes 0,1,2.
        let nodes = subtree_node_indices(0, 2);
        assert_eq!(nodes, vec![0, 1, 2]);
    }

    #[test]
    fn second_level_subtree_root() {
        // D=4, L=2: a subtree rooted at node 4 (level 2) covers nodes on levels 2,3
        // beneath it: node 4 itself, then its two children on level 3.
        // level_of(4) == 2, first_index_on_level(2) == 3, so node 4 has offset 1 on its level.
        let nodes = subtree_node_indices(4, 2);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], 4);
        // children of node 4 live on level 3 (first index 7), at offset 1*2=2 and 3.
        assert_eq!(&nodes[1..], &[9, 10]);
    }

    #[test]
    fn l_equals_1_has_single_bit() {
        let nodes = subtree_node_indices(5, 1);
        assert_eq!(nodes, vec![5]);
    }
}
