//! Plain-text outline of a question tree

use super::model::{DecisionTree, NodeId, Target};
use std::fmt::Write;

impl DecisionTree {
    /// Indented yes/no outline, one line per edge.
    ///
    /// ```text
    /// q1 (india_mentioned)
    ///   yes -> [leaf1] POSITIVE
    ///   no  -> [leaf2] IRRELEVANT
    /// ```
    ///
    /// Subtrees reachable through several paths are printed under each.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.root(), 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = self.node(id);
        let indent = "  ".repeat(depth);
        if node.question_name() == node.name() {
            let _ = writeln!(out, "{indent}{}", node.name());
        } else {
            let _ = writeln!(out, "{indent}{} ({})", node.name(), node.question_name());
        }

        for (branch, target) in [("yes", node.on_yes()), ("no ", node.on_no())] {
            match target {
                Target::Leaf(leaf_id) => {
                    let leaf = self.leaf(leaf_id);
                    let _ = writeln!(
                        out,
                        "{indent}  {branch} -> [{}] {}",
                        leaf.name(),
                        leaf.label()
                    );
                }
                Target::Node(child) => {
                    let _ = writeln!(out, "{indent}  {branch} ->");
                    self.write_node(out, child, depth + 2);
                }
            }
        }
    }
}
