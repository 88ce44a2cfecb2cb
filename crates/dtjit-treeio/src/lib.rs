//! Decision-tree file parsing and random-tree generation used for
//! benchmarks; it has no say in how the tree is compiled, it just gets a
//! [`dtjit_tree::DecisionTree`] onto the heap for `dtjit-resolver` to build
//! evaluators for.
mod error;

use std::path::Path;

use rand::Rng;

use dtjit_tree::{DecisionTree, TreeNode};

pub use error::{Error, Result};

/// Reads a decision tree from a JSON file: a flat array of nodes in the
/// breadth-first layout `dtjit_tree::DecisionTree` expects (see `-o FILE`'s
/// sibling positional `INPUT`).
pub fn read_tree(path: impl AsRef<Path>) -> Result<DecisionTree> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let nodes: Vec<TreeNode> = serde_json::from_slice(&bytes)?;
    let tree = DecisionTree::new(nodes)?;
    tracing::debug!(path = %path.display(), depth = tree.depth(), nodes = tree.node_count(), "read tree file");
    Ok(tree)
}

/// Writes a decision tree's node array out as JSON, the inverse of
/// [`read_tree`].
pub fn write_tree(path: impl AsRef<Path>, tree: &DecisionTree) -> Result<()> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(tree.nodes())?;
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), nodes = tree.node_count(), "wrote tree file");
    Ok(())
}

/// Builds a random perfect binary decision tree of depth `depth`, splitting
/// on features `0..feature_count` with biases drawn uniformly from `[0, 1)`.
///
/// Node `i`'s children are `2*i + 1` and `2*i + 2`: the BFS layout is
/// contiguous by construction, so no separate remapping step is needed.
pub fn random_tree(depth: u8, feature_count: u32, rng: &mut impl Rng) -> DecisionTree {
    assert!(feature_count > 0, "random_tree requires at least one feature");
    let node_count = (1u64 << depth) - 1;
    let leaf_exit_end = 2 * node_count + 1;

    let nodes = (0..node_count)
        .map(|i| {
            let true_child_idx = 2 * i + 1;
            let false_child_idx = 2 * i + 2;
            debug_assert!(true_child_idx < leaf_exit_end && false_child_idx < leaf_exit_end);
            TreeNode {
                feature_index: rng.gen_range(0..feature_count),
                bias: rng.gen_range(0.0f32..1.0),
                true_child_idx,
                false_child_idx,
            }
        })
        .collect();

    let tree = DecisionTree::new(nodes).expect("random_tree always builds a structurally valid tree");
    tracing::debug!(depth, feature_count, "generated random decision tree");
    tree
}

/// Builds a random feature vector of `feature_count` values in `[0, 1)`,
/// suitable for driving [`dtjit_resolver::Resolver::run`]-style benchmarks
/// against a tree built by [`random_tree`] with the same `feature_count`.
pub fn random_dataset(feature_count: u32, rng: &mut impl Rng) -> Vec<f32> {
    (0..feature_count).map(|_| rng.gen_range(0.0f32..1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn random_tree_round_trips_through_json() {
        let mut rng = SmallRng::seed_from_u64(42);
        let tree = random_tree(4, 3, &mut rng);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        write_tree(&path, &tree).unwrap();
        let loaded = read_tree(&path).unwrap();

        assert_eq!(loaded.nodes(), tree.nodes());
        assert_eq!(loaded.depth(), tree.depth());
    }

    #[test]
    fn random_tree_respects_feature_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let tree = random_tree(6, 5, &mut rng);
        assert!(tree.max_feature_index() < 5);
        assert_eq!(tree.node_count(), 63);
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(read_tree(&path), Err(Error::Decode(_))));
    }
}
