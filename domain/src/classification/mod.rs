//! Pure pieces of a traversal step: prompt in, normalized answer out

pub mod answer;
pub mod prompt;

pub use answer::{AnswerVocabulary, normalize_answer};
pub use prompt::{ARTICLE_PLACEHOLDER, render_prompt};
