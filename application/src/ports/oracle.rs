//! Oracle port
//!
//! Defines the interface for asking a language model a single question.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while asking the oracle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// A language model answering free-text prompts
///
/// Implementations (adapters) live in the infrastructure layer. A single
/// instance is shared by every concurrent traversal, so it must be
/// `Send + Sync` and must not keep per-document state.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one prompt and return the verbatim reply text
    async fn ask(&self, prompt: &str) -> Result<String, OracleError>;
}
