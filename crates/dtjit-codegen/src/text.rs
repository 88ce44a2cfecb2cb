//! Textual rendering of emitted programs, used by the CLI's `-S` flag.
use std::fmt::{self, Write};

use crate::ir::{Exit, Switch};

/// Renders every compiled function in `program` the way `-S` dumps them:
/// one `define nodeEvaluator_<root>` block per function, with nested
/// switches indented under the case that introduces them.
pub fn render_program(program: &[Switch]) -> String {
    let mut out = String::new();
    for switch in program {
        let _ = writeln!(out, "define nodeEvaluator_{}:", switch.root_idx);
        render_switch(switch, 1, &mut out);
        let _ = writeln!(out);
    }
    out
}

fn render_switch(switch: &Switch, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    let _ = writeln!(
        out,
        "{pad}switch{}  ; {} node(s), {} case(s)",
        switch.root_idx,
        switch.node_count(),
        switch.cases.len()
    );
    for case in &switch.cases {
        let variants = format_variants(&case.variants);
        match &case.exit {
            Exit::Leaf(idx) => {
                let _ = writeln!(out, "{pad}  case [{variants}] -> store {idx}, ret");
            }
            Exit::Nested(inner) => {
                let _ = writeln!(out, "{pad}  case [{variants}] -> n{}:", inner.root_idx);
                render_switch(inner, indent + 2, out);
            }
        }
    }
}

fn format_variants(variants: &[u32]) -> String {
    let mut s = String::new();
    for (i, v) in variants.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        let _ = write!(s, "{v}");
    }
    s
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render_switch(self, 0, &mut out);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::build_switch;
    use dtjit_tree::{DecisionTree, TreeNode};

    #[test]
    fn renders_one_define_per_function() {
        let tree = DecisionTree::new(vec![
            TreeNode { feature_index: 0, bias: 0.5, true_child_idx: 1, false_child_idx: 2 },
            TreeNode { feature_index: 1, bias: 0.25, true_child_idx: 3, false_child_idx: 4 },
            TreeNode { feature_index: 1, bias: 0.75, true_child_idx: 5, false_child_idx: 6 },
        ])
        .unwrap();
        let switch = build_switch(&tree, 0, 2, 0);
        let rendered = render_program(std::slice::from_ref(&switch));
        assert!(rendered.starts_with("define nodeEvaluator_0:"));
        assert!(rendered.contains("store 3, ret"));
    }
}
