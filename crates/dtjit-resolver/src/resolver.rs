//! `Resolver` construction (precondition validation) and the Runner loop.
use std::collections::HashMap;
use std::path::PathBuf;

use dtjit_codegen::{generator, CompiledEvaluator, Generator};
use dtjit_jit::Jit;
use dtjit_tree::DecisionTree;

use crate::error::{Error, Result};

/// The largest subtree depth a code generator may switch over: `2^L - 1`
/// internal nodes must fit in `dtjit_simd::LANES - 1` real lanes.
pub const MAX_SWITCH_LEVELS: u8 = 3;

/// Owns the decision tree and its compiled evaluators for one
/// `(function_depth, subtree_levels)` configuration. Construction is
/// blocking: it either loads a cached module or runs the IR Emitter to
/// completion before returning; there is no suspension point at steady
/// state.
pub struct Resolver {
    tree: DecisionTree,
    jit: Jit,
    evaluators: HashMap<u64, CompiledEvaluator>,
}

impl Resolver {
    /// Validates the construction preconditions, then
    /// builds (or loads from cache) the evaluator map for `tree`.
    pub fn new(
        tree: DecisionTree,
        feature_count: u32,
        function_depth: u8,
        subtree_levels: u8,
        cache_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let tree_depth = tree.depth();
        if function_depth == 0 || tree_depth % function_depth != 0 {
            return Err(Error::FunctionDepthDoesNotDivideTreeDepth { tree_depth, function_depth });
        }
        if subtree_levels == 0 || subtree_levels > MAX_SWITCH_LEVELS {
            return Err(Error::SwitchLevelsExceedMaximum {
                subtree_levels,
                max: MAX_SWITCH_LEVELS,
            });
        }
        if function_depth % subtree_levels != 0 {
            return Err(Error::SwitchLevelsDoNotDivideFunctionDepth { function_depth, subtree_levels });
        }
        let max_feature_index = tree.max_feature_index();
        if feature_count == 0 || max_feature_index >= feature_count {
            return Err(Error::FeatureCountTooSmall { feature_count, max_feature_index });
        }

        let generator = generator::by_switch_level(subtree_levels);
        let jit = Jit::new(cache_dir);
        let evaluators = jit.load_or_compile(&tree, &*generator, function_depth, feature_count)?;

        tracing::debug!(
            tree_depth,
            function_depth,
            subtree_levels,
            evaluators = evaluators.len(),
            "resolver ready"
        );

        Ok(Self { tree, jit, evaluators })
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    /// Exposes the underlying `Jit`, e.g. to inspect its cache directory.
    pub fn jit(&self) -> &Jit {
        &self.jit
    }

    /// Chains compiled evaluators from the tree root until landing on a
    /// leaf-exit index.
    pub fn run(&self, data: &[f32]) -> u64 {
        let mut idx = 0u64;
        let node_count = self.tree.node_count();
        while idx < node_count {
            let evaluator = &self.evaluators[&idx];
            idx = evaluator(data);
        }
        idx
    }
}
