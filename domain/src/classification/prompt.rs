//! Prompt rendering for question nodes

use crate::core::string::take_chars;

/// Placeholder replaced by the document content
pub const ARTICLE_PLACEHOLDER: &str = "{article}";

/// Render a node prompt for one document.
///
/// Every `{article}` occurrence is replaced with `content`, truncated to
/// `max_chars` characters when a limit is given. A template without the
/// placeholder gets the content appended after a blank line.
pub fn render_prompt(template: &str, content: &str, max_chars: Option<usize>) -> String {
    let content = match max_chars {
        Some(limit) => take_chars(content, limit),
        None => content,
    };

    if template.contains(ARTICLE_PLACEHOLDER) {
        template.replace(ARTICLE_PLACEHOLDER, content)
    } else {
        format!("{}\n\n{}", template, content)
    }
}
