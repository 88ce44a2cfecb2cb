//! `dtjit`: a just-in-time compiler for evaluating large perfect binary
//! decision trees over fixed-width `f32` feature vectors.
//!
//! This crate is a thin facade over the workspace's component crates,
//! re-exporting each of them behind one public API:
//!
//! - [`dtjit_tree`]: the [`DecisionTree`] model and its reference interpreter.
//! - [`dtjit_plan`]: the subtree partitioner, path enumerator and
//!   condition-vector expander (pure functions of tree topology).
//! - [`dtjit_simd`]: the SIMD condition-vector kernel.
//! - [`dtjit_codegen`]: the IR emitter and its three code generators.
//! - [`dtjit_jit`]: the object cache and JIT wrapper.
//! - [`dtjit_resolver`]: [`Resolver`], which ties all of the above together.
//!
//! Typical usage compiles a tree once and evaluates many feature vectors
//! against it:
//!
//! ```no_run
//! use dtjit::{DecisionTree, Resolver, TreeNode};
//!
//! let tree = DecisionTree::new(vec![
//!     TreeNode { feature_index: 0, bias: 0.5, true_child_idx: 1, false_child_idx: 2 },
//! ])
//! .unwrap();
//!
//! let resolver = Resolver::new(tree, 1, 1, 1, "./dtjit-cache").unwrap();
//! let leaf = resolver.run(&[0.75]);
//! assert_eq!(leaf, 1);
//! ```
pub use dtjit_codegen as codegen;
pub use dtjit_jit as jit;
pub use dtjit_plan as plan;
pub use dtjit_simd as simd;
pub use dtjit_tree as tree;

pub use dtjit_resolver::{Error, Resolver, Result, MAX_SWITCH_LEVELS};
pub use dtjit_tree::{DecisionTree, TreeNode};
