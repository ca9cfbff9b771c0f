//! Structural validation of tree descriptions.
//!
//! Every problem is collected rather than stopping at the first, so a broken
//! tree file can be fixed in one pass.

use super::description::TreeDescription;
use crate::core::label::Label;
use std::collections::BTreeMap;
use thiserror::Error;

/// A single structural problem in a tree description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralIssue {
    #[error("tree has no question nodes")]
    EmptyTree,

    #[error("root '{0}' does not name a question node")]
    UnknownRoot(String),

    #[error("root '{0}' names a leaf, but the root must be a question node")]
    RootIsLeaf(String),

    #[error("node '{node}' {branch} references unknown name '{target}'")]
    DanglingReference {
        node: String,
        branch: &'static str,
        target: String,
    },

    #[error("cycle detected: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("'{0}' is defined both as a node and as a leaf")]
    DuplicateName(String),

    #[error("leaf '{leaf}' has unknown label '{label}'")]
    UnknownLabel { leaf: String, label: String },
}

/// A tree description that failed validation.
///
/// Fatal for a run: no traversal may start from an invalid tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid question tree: {}", render_issues(.issues))]
pub struct StructuralError {
    issues: Vec<StructuralIssue>,
}

impl StructuralError {
    pub fn new(issues: Vec<StructuralIssue>) -> Self {
        Self { issues }
    }

    pub(crate) fn single(issue: StructuralIssue) -> Self {
        Self::new(vec![issue])
    }

    /// All detected issues, in a stable order
    pub fn issues(&self) -> &[StructuralIssue] {
        &self.issues
    }
}

fn render_issues(issues: &[StructuralIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect every structural issue of `desc`.
pub(crate) fn validate(desc: &TreeDescription) -> Vec<StructuralIssue> {
    let mut issues = Vec::new();

    if desc.nodes.is_empty() {
        issues.push(StructuralIssue::EmptyTree);
    }

    // Root
    if !desc.nodes.contains_key(&desc.root) {
        if desc.leaves.contains_key(&desc.root) {
            issues.push(StructuralIssue::RootIsLeaf(desc.root.clone()));
        } else {
            issues.push(StructuralIssue::UnknownRoot(desc.root.clone()));
        }
    }

    // Disjoint namespaces
    for name in desc.nodes.keys() {
        if desc.leaves.contains_key(name) {
            issues.push(StructuralIssue::DuplicateName(name.clone()));
        }
    }

    // References
    for (name, node) in &desc.nodes {
        for (branch, target) in [("if_yes", &node.if_yes), ("if_no", &node.if_no)] {
            if !desc.nodes.contains_key(target) && !desc.leaves.contains_key(target) {
                issues.push(StructuralIssue::DanglingReference {
                    node: name.clone(),
                    branch,
                    target: target.clone(),
                });
            }
        }
    }

    // Leaf labels
    for (leaf, label) in &desc.leaves {
        if label.parse::<Label>().is_err() {
            issues.push(StructuralIssue::UnknownLabel {
                leaf: leaf.clone(),
                label: label.clone(),
            });
        }
    }

    issues.extend(find_cycles(desc));
    issues
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first search over node-to-node edges; reports each back edge once.
fn find_cycles(desc: &TreeDescription) -> Vec<StructuralIssue> {
    let mut marks: BTreeMap<&str, Mark> = desc
        .nodes
        .keys()
        .map(|k| (k.as_str(), Mark::Unvisited))
        .collect();
    let mut cycles = Vec::new();

    for start in desc.nodes.keys() {
        if marks.get(start.as_str()) == Some(&Mark::Unvisited) {
            let mut path = Vec::new();
            visit(desc, start, &mut marks, &mut path, &mut cycles);
        }
    }

    cycles
}

fn visit<'a>(
    desc: &'a TreeDescription,
    name: &'a str,
    marks: &mut BTreeMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
    cycles: &mut Vec<StructuralIssue>,
) {
    let Some(node) = desc.nodes.get(name) else {
        return;
    };
    marks.insert(name, Mark::InProgress);
    path.push(name);

    for target in [node.if_yes.as_str(), node.if_no.as_str()] {
        match marks.get(target).copied() {
            Some(Mark::Unvisited) => visit(desc, target, marks, path, cycles),
            Some(Mark::InProgress) => {
                let start = path.iter().position(|n| *n == target).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(target.to_string());
                cycles.push(StructuralIssue::CycleDetected { path: cycle });
            }
            // Finished nodes and leaves/unknown names end the walk
            Some(Mark::Done) | None => {}
        }
    }

    path.pop();
    marks.insert(name, Mark::Done);
}
