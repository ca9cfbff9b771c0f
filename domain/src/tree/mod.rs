//! Question tree: description, validation and the immutable built model

pub mod description;
pub mod model;
mod render;
pub mod validation;

pub use description::{NodeDescription, TreeDescription};
pub use model::{DecisionTree, Leaf, LeafId, NodeId, QuestionNode, Target};
pub use validation::{StructuralError, StructuralIssue};
