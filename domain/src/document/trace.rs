//! Trace entries: the audit trail of one traversal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized oracle answer to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    /// The reply matched neither vocabulary; never coerced to yes or no
    Unparseable,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Unparseable => "unparseable",
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One visited question node: what was asked and what came back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Question name of the visited node
    pub question_name: String,
    /// Normalized answer
    pub answer: Answer,
    /// Verbatim oracle reply
    #[serde(default)]
    pub raw_answer: String,
    /// When the answer was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TraceEntry {
    /// Create an entry stamped with the current time
    pub fn new(
        question_name: impl Into<String>,
        answer: Answer,
        raw_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_name: question_name.into(),
            answer,
            raw_answer: raw_answer.into(),
            timestamp: Some(Utc::now()),
        }
    }
}
