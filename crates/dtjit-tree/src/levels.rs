//! Index arithmetic for the implicit breadth-first layout of a perfect binary tree.
//!
//! Node `i` (0-based) sits on level `floor(log2(i + 1))`, and level `l` begins at
//! index `2^l - 1` and holds `2^l` nodes. These are used throughout the
//! partitioner, path enumerator and condition-vector expander.

/// The level (0-based, root is level 0) that tree index `idx` lies on.
#[inline]
pub fn level_of(idx: u64) -> u8 {
    64 - (idx + 1).leading_zeros() as u8 - 1
}

/// The first tree index on `level` (`2^level - 1`).
#[inline]
pub fn first_index_on_level(level: u8) -> u64 {
    (1u64 << level) - 1
}

/// The number of nodes on `level` (`2^level`).
#[inline]
pub fn nodes_on_level(level: u8) -> u64 {
    1u64 << level
}

/// `true` iff `n + 1` is a power of two, i.e. `n` nodes form a perfect binary tree
/// (or a perfect set of leaf exits).
#[inline]
pub fn is_complete_node_count(n: u64) -> bool {
    (n + 1).is_power_of_two()
}

/// The tree depth `D` such that `node_count == 2^D - 1`. Callers must have already
/// checked [`is_complete_node_count`].
#[inline]
pub fn depth_for_node_count(node_count: u64) -> u8 {
    (node_count + 1).trailing_zeros() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_of_small_tree() {
        // A depth-3 tree: nodes 0..6 internal (level 0,1,2), leaves 7..14.
        assert_eq!(level_of(0), 0);
        assert_eq!(level_of(1), 1);
        assert_eq!(level_of(2), 1);
        assert_eq!(level_of(3), 2);
        assert_eq!(level_of(6), 2);
        assert_eq!(level_of(7), 3);
    }

    #[test]
    fn first_index_and_count_round_trip() {
        for level in 0..10u8 {
            let first = first_index_on_level(level);
            assert_eq!(level_of(first), level);
            assert_eq!(nodes_on_level(level), 1u64 << level);
        }
    }

    #[test]
    fn node_counts() {
        assert!(is_complete_node_count(0));
        assert!(is_complete_node_count(1));
        assert!(is_complete_node_count(3));
        assert!(is_complete_node_count(7));
        assert!(!is_complete_node_count(2));
        assert!(!is_complete_node_count(5));
        assert_eq!(depth_for_node_count(7), 3);
        assert_eq!(depth_for_node_count(0), 0);
    }
}
