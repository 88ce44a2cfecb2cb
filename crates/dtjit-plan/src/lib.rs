//! Pure, tree-topology-only algorithms shared by the IR Emitter: partitioning
//! a tree into fixed-depth subtrees, enumerating each subtree's exits, and
//! expanding each exit into the condition-vector variants that must switch
//! to it.
//!
//! Everything here is a pure function of `(root_idx, subtree_levels, tree
//! topology)`; none of it touches feature data or performs any compilation.
pub mod partition;
pub mod paths;
pub mod plan;
pub mod variants;

pub use paths::{Exit, PathBitsMap};
pub use plan::SubtreePlan;
