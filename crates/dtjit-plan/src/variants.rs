use crate::paths::PathBitsMap;

/// The condition-vector value with every bit named in `path` fixed to its
/// required outcome and every other bit zero.
pub fn fixed_template(path: &PathBitsMap) -> u32 {
    let mut template = 0u32;
    for (&offset, &bit) in path {
        if bit {
            template |= 1 << offset;
        }
    }
    template
}

/// Bit offsets `0..2^L - 2` not constrained by `path` — the "don't care"
/// bits whose value never affects which exit is reached.
pub fn variable_offsets(path: &PathBitsMap, subtree_levels: u8) -> Vec<u8> {
    let num_nodes = (1u32 << subtree_levels) - 1;
    (0..num_nodes as u8).filter(|o| !path.contains_key(o)).collect()
}

/// Every canonical condition-vector variant consistent with `path`: the
/// fixed template, ORed with every possible assignment of the "don't care"
/// bits. The emitted switch carries one case per variant, all targeting
/// the same exit.
///
/// Across every exit of one subtree these sets partition
/// `[0, 2^(2^L - 1))`: any condition vector value hits exactly one exit.
pub fn canonical_variants(path: &PathBitsMap, subtree_levels: u8) -> Vec<u32> {
    let template = fixed_template(path);
    let free = variable_offsets(path, subtree_levels);

    let mut variants = Vec::with_capacity(1 << free.len());
    for mask in 0..(1u32 << free.len()) {
        let mut variant = template;
        for (bit_idx, &offset) in free.iter().enumerate() {
            if (mask >> bit_idx) & 1 == 1 {
                variant |= 1 << offset;
            }
        }
        variants.push(variant);
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn single_fully_constrained_path_has_one_variant() {
        let path: PathBitsMap = HashMap::from([(0, true), (1, true)]);
        let variants = canonical_variants(&path, 2);
        assert_eq!(variants, vec![0b011]);
    }

    #[test]
    fn partially_constrained_path_expands_over_dont_cares() {
        // L=2: 3 bits total. Constrain only bit 0 to true; bits 1,2 are free.
        let path: PathBitsMap = HashMap::from([(0, true)]);
        let mut variants = canonical_variants(&path, 2);
        variants.sort();
        assert_eq!(variants, vec![0b001, 0b011, 0b101, 0b111]);
    }

    #[test]
    fn exits_of_one_subtree_partition_the_universe() {
        use crate::{paths::enumerate_exits, partition::subtree_node_indices};
        use dtjit_tree::{DecisionTree, TreeNode};

        let tree = DecisionTree::new(vec![
            TreeNode { feature_index: 0, bias: 0.5, true_child_idx: 1, false_child_idx: 2 },
            TreeNode { feature_index: 1, bias: 0.25, true_child_idx: 3, false_child_idx: 4 },
            TreeNode { feature_index: 1, bias: 0.75, true_child_idx: 5, false_child_idx: 6 },
        ])
        .unwrap();

        let subtree_levels = 2;
        let node_indices = subtree_node_indices(0, subtree_levels);
        let offsets: HashMap<u64, u8> = node_indices
            .iter()
            .enumerate()
            .map(|(i, &idx)| (idx, i as u8))
            .collect();
        let exits = enumerate_exits(&tree, 0, subtree_levels, &offsets);

        let mut seen = HashSet::new();
        for exit in &exits {
            for variant in canonical_variants(&exit.path, subtree_levels) {
                assert!(seen.insert(variant), "variant {variant} claimed by two exits");
            }
        }

        let universe_size = 1u32 << ((1u32 << subtree_levels) - 1);
        assert_eq!(seen.len(), universe_size as usize);
        assert_eq!(seen, (0..universe_size).collect());
    }
}
