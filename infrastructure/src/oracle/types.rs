//! Wire types for the llama.cpp `/completion` endpoint

use serde::{Deserialize, Serialize};
use triage_application::OracleError;

/// Request body for `POST /completion`
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub n_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    pub stop: &'a [String],
}

/// One entry of an OpenAI-style `choices` array
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub text: String,
}

/// Accepted response shapes.
///
/// llama.cpp answers with `{"content": ...}`; OpenAI-compatible front ends
/// answer with `{"choices": [{"text": ...}]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompletionResponse {
    Content { content: String },
    Choices { choices: Vec<Choice> },
}

impl CompletionResponse {
    /// Generated text, or `UnexpectedResponse` when there is none
    pub fn into_text(self) -> Result<String, OracleError> {
        match self {
            CompletionResponse::Content { content } => Ok(content),
            CompletionResponse::Choices { choices } => choices
                .into_iter()
                .next()
                .map(|c| c.text)
                .ok_or_else(|| OracleError::UnexpectedResponse("empty choices array".to_string())),
        }
    }
}

/// Parse a response body into generated text
pub fn parse_completion(body: &str) -> Result<String, OracleError> {
    let response: CompletionResponse = serde_json::from_str(body).map_err(|e| {
        OracleError::UnexpectedResponse(format!("unrecognized completion body ({}): {}", e, body))
    })?;
    response.into_text()
}
