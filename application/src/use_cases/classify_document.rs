//! Classify Document use case
//!
//! Walks one document through the question tree, asking the oracle at every
//! node until a leaf (or a failure) decides the label.
//!
//! # Outcomes
//!
//! | Situation | Label | Oracle calls |
//! |-----------|-------|--------------|
//! | Content absent or shorter than `min_size` | `TOO_SHORT` | 0 |
//! | Every answer yes/no, leaf reached | leaf label | path length |
//! | Reply matches neither vocabulary | `UNCERTAIN` | up to that node |
//! | Oracle error, timeout or cancellation | `ERROR` | up to that node |
//!
//! The tree is never mutated and the document is finished exactly once.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::oracle::{Oracle, OracleError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use triage_domain::{
    Answer, AnswerVocabulary, DecisionTree, Document, Label, Target, TraceEntry, render_prompt,
};

/// Per-traversal limits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Upper bound on a single oracle call
    pub timeout: Option<Duration>,
    /// Truncate content substituted into prompts to this many characters
    pub max_chars: Option<usize>,
}

/// Result of classifying one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub label: Label,
    pub oracle_calls: usize,
    /// The traversal was stopped by cancellation rather than by the tree
    pub interrupted: bool,
}

/// Use case for classifying a single document
///
/// Cheap to clone: everything is shared behind `Arc`.
#[derive(Clone)]
pub struct ClassifyDocumentUseCase {
    tree: Arc<DecisionTree>,
    oracle: Arc<dyn Oracle>,
    options: TraversalOptions,
    vocabulary: AnswerVocabulary,
    logger: Arc<dyn ConversationLogger>,
}

impl ClassifyDocumentUseCase {
    pub fn new(tree: Arc<DecisionTree>, oracle: Arc<dyn Oracle>) -> Self {
        Self {
            tree,
            oracle,
            options: TraversalOptions::default(),
            vocabulary: AnswerVocabulary::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_options(mut self, options: TraversalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: AnswerVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    /// Classify without cancellation
    pub async fn execute(&self, doc: &mut Document) -> Classification {
        self.execute_with_cancellation(doc, None).await
    }

    /// Classify, stopping with `ERROR` if `cancel` fires during an oracle call.
    ///
    /// A document that is already treated is left untouched.
    pub async fn execute_with_cancellation(
        &self,
        doc: &mut Document,
        cancel: Option<&CancellationToken>,
    ) -> Classification {
        if doc.treated {
            debug!("Document {} already treated, skipping", doc.id);
            return Classification {
                label: doc.predicted_label.unwrap_or(Label::Ungraded),
                oracle_calls: 0,
                interrupted: false,
            };
        }

        let length = doc.content_len();
        let content = match doc.content.clone() {
            Some(content) if length >= self.tree.min_size() => content,
            _ => {
                debug!(
                    "Document {} too short ({} < {})",
                    doc.id,
                    length,
                    self.tree.min_size()
                );
                doc.add_meta("error", format!("Content too short: {} characters", length));
                return self.finish(doc, Label::TooShort, 0, false);
            }
        };

        let mut calls = 0;
        let mut pointer = Target::Node(self.tree.root());
        loop {
            let id = match pointer {
                Target::Leaf(leaf_id) => {
                    let leaf = self.tree.leaf(leaf_id);
                    doc.add_meta("leaf", leaf.name());
                    return self.finish(doc, leaf.label(), calls, false);
                }
                Target::Node(id) => id,
            };
            let node = self.tree.node(id);

            if cancel.is_some_and(|token| token.is_cancelled()) {
                return self.fail(doc, OracleError::Cancelled, calls);
            }

            let prompt = render_prompt(node.prompt(), &content, self.options.max_chars);
            calls += 1;
            let raw = match self.ask(&prompt, cancel).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        "Oracle failed on document {} at '{}': {}",
                        doc.id,
                        node.question_name(),
                        e
                    );
                    self.logger.log(ConversationEvent::new(
                        "oracle_error",
                        json!({
                            "document_id": doc.id,
                            "question_name": node.question_name(),
                            "error": e.to_string(),
                        }),
                    ));
                    return self.fail(doc, e, calls);
                }
            };

            let answer = self.vocabulary.normalize(&raw);
            debug!(
                "Document {} '{}' -> {}",
                doc.id,
                node.question_name(),
                answer
            );
            self.logger.log(ConversationEvent::new(
                "oracle_exchange",
                json!({
                    "document_id": doc.id,
                    "question_name": node.question_name(),
                    "prompt": prompt,
                    "response": raw,
                    "answer": answer.as_str(),
                }),
            ));
            doc.push_trace(TraceEntry::new(node.question_name(), answer, raw.clone()));

            pointer = match answer {
                Answer::Yes => node.on_yes(),
                Answer::No => node.on_no(),
                Answer::Unparseable => {
                    doc.add_meta(
                        "error",
                        format!(
                            "Invalid response from question '{}': {}",
                            node.question_name(),
                            raw.trim()
                        ),
                    );
                    return self.finish(doc, Label::Uncertain, calls, false);
                }
            };
        }
    }

    /// One oracle call, bounded by the timeout and the cancellation token
    async fn ask(
        &self,
        prompt: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, OracleError> {
        let call = async {
            match self.options.timeout {
                Some(limit) => match tokio::time::timeout(limit, self.oracle.ask(prompt)).await {
                    Ok(result) => result,
                    Err(_) => Err(OracleError::Timeout(limit)),
                },
                None => self.oracle.ask(prompt).await,
            }
        };

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(OracleError::Cancelled),
                result = call => result,
            },
            None => call.await,
        }
    }

    fn fail(&self, doc: &mut Document, error: OracleError, calls: usize) -> Classification {
        let interrupted = error == OracleError::Cancelled;
        doc.add_meta("error", format!("LLM call failed: {}", error));
        self.finish(doc, Label::Error, calls, interrupted)
    }

    fn finish(
        &self,
        doc: &mut Document,
        label: Label,
        oracle_calls: usize,
        interrupted: bool,
    ) -> Classification {
        doc.finish(label);
        self.logger.log(ConversationEvent::new(
            "document_classified",
            json!({
                "document_id": doc.id,
                "label": label.as_str(),
                "oracle_calls": oracle_calls,
                "interrupted": interrupted,
            }),
        ));
        Classification {
            label,
            oracle_calls,
            interrupted,
        }
    }
}
