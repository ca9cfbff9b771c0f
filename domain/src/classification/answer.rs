//! Yes/no normalization of free-form oracle replies

use crate::document::trace::Answer;

/// Words accepted as "yes" and "no" (Value Object)
///
/// Matching is case-insensitive and looks only at the first word of the
/// reply, with surrounding punctuation stripped: `"Yes."`, `"NO, because"`
/// and `"**yes**"` all match. A reply that matches neither list is
/// [`Answer::Unparseable`] and is never coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerVocabulary {
    yes: Vec<String>,
    no: Vec<String>,
}

impl Default for AnswerVocabulary {
    fn default() -> Self {
        Self {
            yes: vec!["yes".into(), "y".into(), "true".into()],
            no: vec!["no".into(), "n".into(), "false".into()],
        }
    }
}

impl AnswerVocabulary {
    /// Replace the "yes" words
    pub fn with_yes<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.yes = words.into_iter().map(|w| w.into().to_lowercase()).collect();
        self
    }

    /// Replace the "no" words
    pub fn with_no<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no = words.into_iter().map(|w| w.into().to_lowercase()).collect();
        self
    }

    /// Normalize a raw reply
    pub fn normalize(&self, raw: &str) -> Answer {
        let Some(word) = first_word(raw) else {
            return Answer::Unparseable;
        };

        if self.yes.iter().any(|w| *w == word) {
            Answer::Yes
        } else if self.no.iter().any(|w| *w == word) {
            Answer::No
        } else {
            Answer::Unparseable
        }
    }
}

/// Normalize with the default vocabulary
pub fn normalize_answer(raw: &str) -> Answer {
    AnswerVocabulary::default().normalize(raw)
}

fn first_word(raw: &str) -> Option<String> {
    let token = raw.split_whitespace().next()?;
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(normalize_answer("yes"), Answer::Yes);
        assert_eq!(normalize_answer("no"), Answer::No);
        assert_eq!(normalize_answer("Y"), Answer::Yes);
        assert_eq!(normalize_answer("n"), Answer::No);
        assert_eq!(normalize_answer("TRUE"), Answer::Yes);
        assert_eq!(normalize_answer("False"), Answer::No);
    }

    #[test]
    fn test_punctuation_and_trailing_text() {
        assert_eq!(normalize_answer("Yes."), Answer::Yes);
        assert_eq!(normalize_answer("  No, India is not mentioned."), Answer::No);
        assert_eq!(normalize_answer("**yes**"), Answer::Yes);
        assert_eq!(normalize_answer("\"No\"\n"), Answer::No);
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(normalize_answer("maybe"), Answer::Unparseable);
        assert_eq!(normalize_answer(""), Answer::Unparseable);
        assert_eq!(normalize_answer("   "), Answer::Unparseable);
        assert_eq!(normalize_answer("..."), Answer::Unparseable);
        assert_eq!(normalize_answer("n/a"), Answer::Unparseable);
        // Only the first word counts
        assert_eq!(normalize_answer("I think yes"), Answer::Unparseable);
        assert_eq!(normalize_answer("yesterday"), Answer::Unparseable);
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocab = AnswerVocabulary::default()
            .with_yes(["Oui", "yes"])
            .with_no(["non"]);
        assert_eq!(vocab.normalize("oui!"), Answer::Yes);
        assert_eq!(vocab.normalize("Non"), Answer::No);
        assert_eq!(vocab.normalize("no"), Answer::Unparseable);
    }
}
