//! Tree description: the on-disk shape of a question tree
//!
//! ```json
//! {
//!   "min_size": 300,
//!   "root": "q1",
//!   "nodes": {
//!     "q1": {
//!       "question_name": "india_mentioned",
//!       "prompt": "Is India mentioned?\n{article}",
//!       "if_yes": "leaf1",
//!       "if_no": "leaf2"
//!     }
//!   },
//!   "leaves": { "leaf1": "POSITIVE", "leaf2": "IRRELEVANT" }
//! }
//! ```
//!
//! A description is untrusted input. [`TreeDescription::build`] validates it
//! and is the only way to obtain a [`DecisionTree`].

use super::model::{DecisionTree, Leaf, LeafId, NodeId, QuestionNode, Target};
use super::validation::{StructuralError, StructuralIssue, validate};
use crate::core::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Raw description of one question node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Human-readable question name recorded in traces
    #[serde(default)]
    pub question_name: String,
    /// Prompt template; `{article}` is replaced with the document content
    pub prompt: String,
    /// Node or leaf name followed on a "yes" answer
    pub if_yes: String,
    /// Node or leaf name followed on a "no" answer
    pub if_no: String,
}

impl NodeDescription {
    pub fn new(
        question_name: impl Into<String>,
        prompt: impl Into<String>,
        if_yes: impl Into<String>,
        if_no: impl Into<String>,
    ) -> Self {
        Self {
            question_name: question_name.into(),
            prompt: prompt.into(),
            if_yes: if_yes.into(),
            if_no: if_no.into(),
        }
    }
}

/// Raw description of a whole tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDescription {
    /// Minimum content length (characters) required to ask any question
    #[serde(default)]
    pub min_size: usize,
    /// Name of the first node
    pub root: String,
    /// Question nodes by name
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeDescription>,
    /// Leaf label names by leaf name
    #[serde(default)]
    pub leaves: BTreeMap<String, String>,
}

impl TreeDescription {
    /// Start an empty description rooted at `root`
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            min_size: 0,
            root: root.into(),
            nodes: BTreeMap::new(),
            leaves: BTreeMap::new(),
        }
    }

    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_node(mut self, name: impl Into<String>, node: NodeDescription) -> Self {
        self.nodes.insert(name.into(), node);
        self
    }

    pub fn with_leaf(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.leaves.insert(name.into(), label.into());
        self
    }

    /// Parse a JSON description
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Every structural problem in this description (empty when valid)
    pub fn validate(&self) -> Vec<StructuralIssue> {
        validate(self)
    }

    /// Validate and build an immutable [`DecisionTree`].
    ///
    /// Node and leaf references are resolved to typed indices here, so a
    /// built tree cannot contain a dangling reference.
    pub fn build(&self) -> Result<DecisionTree, StructuralError> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(StructuralError::new(issues));
        }

        let node_ids: HashMap<&str, NodeId> = self
            .nodes
            .keys()
            .enumerate()
            .map(|(i, name)| (name.as_str(), NodeId(i)))
            .collect();
        let leaf_ids: HashMap<&str, LeafId> = self
            .leaves
            .keys()
            .enumerate()
            .map(|(i, name)| (name.as_str(), LeafId(i)))
            .collect();

        let resolve = |node: &str, branch: &'static str, target: &str| {
            node_ids
                .get(target)
                .map(|id| Target::Node(*id))
                .or_else(|| leaf_ids.get(target).map(|id| Target::Leaf(*id)))
                .ok_or_else(|| {
                    StructuralError::single(StructuralIssue::DanglingReference {
                        node: node.to_string(),
                        branch,
                        target: target.to_string(),
                    })
                })
        };

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (name, node) in &self.nodes {
            nodes.push(QuestionNode {
                name: name.clone(),
                question_name: node.question_name.clone(),
                prompt: node.prompt.clone(),
                on_yes: resolve(name, "if_yes", &node.if_yes)?,
                on_no: resolve(name, "if_no", &node.if_no)?,
            });
        }

        let mut leaves = Vec::with_capacity(self.leaves.len());
        for (name, label) in &self.leaves {
            let label: Label = label.parse().map_err(|_| {
                StructuralError::single(StructuralIssue::UnknownLabel {
                    leaf: name.clone(),
                    label: label.clone(),
                })
            })?;
            leaves.push(Leaf {
                name: name.clone(),
                label,
            });
        }

        let root = node_ids
            .get(self.root.as_str())
            .copied()
            .ok_or_else(|| StructuralError::single(StructuralIssue::UnknownRoot(self.root.clone())))?;

        Ok(DecisionTree {
            min_size: self.min_size,
            root,
            nodes,
            leaves,
        })
    }
}
