//! Turns `ir::Switch` trees into native closures: instead of a separate
//! optimize/compile-to-object/link pipeline, each switch is lowered directly
//! to a Rust closure once, at construction time.
use std::collections::HashMap;
use std::sync::Arc;

use dtjit_simd::{Backend, LANES};

use crate::ir::{self, Exit};

/// A compiled subtree evaluator: `(&[f32]) -> u64`, the safe-Rust analogue
/// of a `u64(const f32*)` native function pointer.
pub type CompiledEvaluator = Box<dyn Fn(&[f32]) -> u64 + Send + Sync>;

struct CompiledSwitch {
    node_feature_biases: Vec<(u32, f32)>,
    shift_masks: [i32; LANES],
    backend: Backend,
    /// Dense table from condition-vector value to exit, indexed directly by
    /// the value (`2^node_count` entries): the precomputed form of the
    /// emitted switch's case labels.
    by_variant: Vec<CompiledExit>,
}

#[derive(Clone)]
enum CompiledExit {
    Leaf(u64),
    Nested(Arc<CompiledSwitch>),
}

impl CompiledSwitch {
    fn build(switch: &ir::Switch, backend: Backend) -> Self {
        let node_count = switch.node_count();
        let mut shift_masks = [0i32; LANES];
        shift_masks[..switch.shift_masks.len()].copy_from_slice(&switch.shift_masks);

        // Placeholder entries are overwritten by every real case below; `verify_switch`
        // (run before `compile`) guarantees the cases cover every variant exactly once.
        let mut by_variant = vec![CompiledExit::Leaf(0); 1usize << node_count];
        for case in &switch.cases {
            let compiled_exit = match &case.exit {
                Exit::Leaf(idx) => CompiledExit::Leaf(*idx),
                Exit::Nested(inner) => CompiledExit::Nested(Arc::new(Self::build(inner, backend))),
            };
            for &variant in &case.variants {
                by_variant[variant as usize] = compiled_exit.clone();
            }
        }

        Self {
            node_feature_biases: switch.node_feature_biases.clone(),
            shift_masks,
            backend,
            by_variant,
        }
    }

    fn eval(&self, data: &[f32]) -> u64 {
        let mut features = [0.0f32; LANES];
        let mut biases = [0.0f32; LANES];
        for (offset, &(feature_index, bias)) in self.node_feature_biases.iter().enumerate() {
            features[offset] = data[feature_index as usize];
            biases[offset] = bias;
        }

        let condition_vector =
            dtjit_simd::condition_vector(self.backend, &features, &biases, &self.shift_masks);

        match &self.by_variant[condition_vector as usize] {
            CompiledExit::Leaf(idx) => *idx,
            CompiledExit::Nested(inner) => inner.eval(data),
        }
    }
}

/// Compiles one switch into a callable evaluator.
pub fn compile(switch: &ir::Switch, backend: Backend) -> CompiledEvaluator {
    let compiled = Arc::new(CompiledSwitch::build(switch, backend));
    Box::new(move |data: &[f32]| compiled.eval(data))
}

/// Compiles every function in a program, keyed by its subtree root's
/// full-tree index — the evaluator map the Runner dispatches through.
pub fn compile_program(
    switches: &[ir::Switch],
    backend: Backend,
) -> HashMap<u64, CompiledEvaluator> {
    switches
        .iter()
        .map(|switch| (switch.root_idx, compile(switch, backend)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtjit_tree::{DecisionTree, TreeNode};

    fn sample_tree() -> DecisionTree {
        DecisionTree::new(vec![
            TreeNode { feature_index: 0, bias: 0.5, true_child_idx: 1, false_child_idx: 2 },
            TreeNode { feature_index: 1, bias: 0.25, true_child_idx: 3, false_child_idx: 4 },
            TreeNode { feature_index: 1, bias: 0.75, true_child_idx: 5, false_child_idx: 6 },
        ])
        .unwrap()
    }

    #[test]
    fn compiled_switch_matches_reference_interpreter() {
        let tree = sample_tree();
        let switch = ir::build_switch(&tree, 0, 2, 0);
        let evaluator = compile(&switch, Backend::Scalar);

        let cases: [([f32; 2], u64); 6] = [
            ([0.1, 0.1], 6),
            ([0.1, 0.9], 5),
            ([0.9, 0.1], 4),
            ([0.9, 0.9], 3),
            ([0.5, 0.1], 6),
            ([f32::NAN, 0.9], 5),
        ];
        for (data, expected) in cases {
            assert_eq!(evaluator(&data), expected);
            assert_eq!(tree.interpret(0, &data), expected);
        }
    }

    #[test]
    fn nested_switch_chains_to_child_layer() {
        let tree = sample_tree();
        let program = ir::build_program(&tree, 2, 1);
        let evaluators = compile_program(&program, Backend::Scalar);
        let evaluator = &evaluators[&0];

        for (data, expected) in [
            ([0.9f32, 0.9f32], 3u64),
            ([0.9, 0.1], 4),
            ([0.1, 0.9], 5),
            ([0.1, 0.1], 6),
        ] {
            assert_eq!(evaluator(&data), expected);
        }
    }
}
