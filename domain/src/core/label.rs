//! Label value object: the closed set of classification outcomes

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a string does not name a [`Label`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label '{0}'")]
pub struct LabelParseError(pub String);

/// Classification outcome for a document (Value Object)
///
/// Used both for ground truth (`true_label`) and for predictions
/// (`predicted_label`). The first four variants are answers about the
/// document itself; the remaining ones describe why no answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
    Irrelevant,
    Uncertain,
    Error,
    TooShort,
    NeedHumanReview,
    Ungraded,
}

impl Label {
    /// Every label, in declaration order
    pub const ALL: [Label; 9] = [
        Label::Positive,
        Label::Negative,
        Label::Neutral,
        Label::Irrelevant,
        Label::Uncertain,
        Label::Error,
        Label::TooShort,
        Label::NeedHumanReview,
        Label::Ungraded,
    ];

    /// Canonical upper-case name (as used in tree descriptions)
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Neutral => "NEUTRAL",
            Label::Irrelevant => "IRRELEVANT",
            Label::Uncertain => "UNCERTAIN",
            Label::Error => "ERROR",
            Label::TooShort => "TOO_SHORT",
            Label::NeedHumanReview => "NEED_HUMAN_REVIEW",
            Label::Ungraded => "UNGRADED",
        }
    }

    /// Lower-case form (as used in label index files and export file names)
    pub fn value(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
            Label::Irrelevant => "irrelevant",
            Label::Uncertain => "uncertain",
            Label::Error => "error",
            Label::TooShort => "too_short",
            Label::NeedHumanReview => "need_human_review",
            Label::Ungraded => "ungraded",
        }
    }

    /// Whether this label is an answer about the document's subject,
    /// as opposed to a non-answer (error, too short, uncertain, ...)
    pub fn is_answer(&self) -> bool {
        matches!(
            self,
            Label::Positive | Label::Negative | Label::Neutral | Label::Irrelevant
        )
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Label {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Label::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LabelParseError(s.to_string()))
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
