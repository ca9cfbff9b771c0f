//! Binary relevance view of labels

use crate::core::label::Label;
use serde::{Deserialize, Serialize};

/// Collapsed relevance class used by binary evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Relevant,
    Irrelevant,
}

impl Relevance {
    pub const ALL: [Relevance; 2] = [Relevance::Relevant, Relevance::Irrelevant];

    /// Map a label to its relevance class.
    ///
    /// POSITIVE, NEGATIVE and NEUTRAL are relevant, IRRELEVANT is
    /// irrelevant; every non-answer label has no relevance class.
    pub fn of(label: Label) -> Option<Self> {
        match label {
            Label::Positive | Label::Negative | Label::Neutral => Some(Relevance::Relevant),
            Label::Irrelevant => Some(Relevance::Irrelevant),
            Label::Uncertain
            | Label::Error
            | Label::TooShort
            | Label::NeedHumanReview
            | Label::Ungraded => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::Relevant => "relevant",
            Relevance::Irrelevant => "irrelevant",
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
