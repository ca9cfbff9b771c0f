//! Validated, immutable question tree

use super::description::{NodeDescription, TreeDescription};
use crate::core::label::Label;
use std::collections::BTreeMap;

/// Index of a question node inside its [`DecisionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Index of a leaf inside its [`DecisionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub(crate) usize);

/// Where an answer leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Node(NodeId),
    Leaf(LeafId),
}

/// A named binary decision point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionNode {
    pub(crate) name: String,
    pub(crate) question_name: String,
    pub(crate) prompt: String,
    pub(crate) on_yes: Target,
    pub(crate) on_no: Target,
}

impl QuestionNode {
    /// Key of this node in the tree
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name recorded in traces; falls back to the node key when unset
    pub fn question_name(&self) -> &str {
        if self.question_name.is_empty() {
            &self.name
        } else {
            &self.question_name
        }
    }

    /// Prompt template
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn on_yes(&self) -> Target {
        self.on_yes
    }

    pub fn on_no(&self) -> Target {
        self.on_no
    }
}

/// A terminal position resolving to a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub(crate) name: String,
    pub(crate) label: Label,
}

impl Leaf {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

/// A validated question tree (Entity)
///
/// Only obtainable through [`TreeDescription::build`], so every instance is
/// acyclic, rooted at a question node, and free of dangling references.
/// Read-only after construction; share it across traversals with `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    pub(crate) min_size: usize,
    pub(crate) root: NodeId,
    pub(crate) nodes: Vec<QuestionNode>,
    pub(crate) leaves: Vec<Leaf>,
}

impl DecisionTree {
    /// Minimum content length (characters) needed before asking anything
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id.
    ///
    /// Ids are only handed out by this tree, so lookups cannot miss.
    pub fn node(&self, id: NodeId) -> &QuestionNode {
        &self.nodes[id.0]
    }

    pub fn leaf(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &QuestionNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn leaves(&self) -> impl Iterator<Item = (LeafId, &Leaf)> {
        self.leaves.iter().enumerate().map(|(i, l)| (LeafId(i), l))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Maximum number of question nodes on any root-to-leaf path.
    ///
    /// This bounds the number of oracle calls a single traversal can make.
    pub fn depth(&self) -> usize {
        let mut memo = vec![None; self.nodes.len()];
        self.depth_from(self.root, &mut memo)
    }

    fn depth_from(&self, id: NodeId, memo: &mut Vec<Option<usize>>) -> usize {
        if let Some(depth) = memo[id.0] {
            return depth;
        }
        let node = &self.nodes[id.0];
        let below = [node.on_yes, node.on_no]
            .into_iter()
            .map(|target| match target {
                Target::Node(child) => self.depth_from(child, memo),
                Target::Leaf(_) => 0,
            })
            .max()
            .unwrap_or(0);
        memo[id.0] = Some(below + 1);
        below + 1
    }

    /// Names of nodes that no path from the root can reach
    pub fn unreachable_nodes(&self) -> Vec<&str> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if seen[id.0] {
                continue;
            }
            seen[id.0] = true;
            let node = &self.nodes[id.0];
            for target in [node.on_yes, node.on_no] {
                if let Target::Node(child) = target {
                    stack.push(child);
                }
            }
        }

        self.nodes
            .iter()
            .zip(seen)
            .filter(|(_, reached)| !reached)
            .map(|(n, _)| n.name.as_str())
            .collect()
    }

    /// Name of the node or leaf a target points at
    pub fn target_name(&self, target: Target) -> &str {
        match target {
            Target::Node(id) => self.node(id).name(),
            Target::Leaf(id) => self.leaf(id).name(),
        }
    }

    /// Rebuild the description this tree was built from
    pub fn to_description(&self) -> TreeDescription {
        let nodes: BTreeMap<String, NodeDescription> = self
            .nodes
            .iter()
            .map(|n| {
                (
                    n.name.clone(),
                    NodeDescription {
                        question_name: n.question_name.clone(),
                        prompt: n.prompt.clone(),
                        if_yes: self.target_name(n.on_yes).to_string(),
                        if_no: self.target_name(n.on_no).to_string(),
                    },
                )
            })
            .collect();
        let leaves: BTreeMap<String, String> = self
            .leaves
            .iter()
            .map(|l| (l.name.clone(), l.label.as_str().to_string()))
            .collect();

        TreeDescription {
            min_size: self.min_size,
            root: self.node(self.root).name.clone(),
            nodes,
            leaves,
        }
    }
}
