//! llama.cpp server adapter for the [`Oracle`] port

use super::types::{CompletionRequest, parse_completion};
use crate::config::FileOracleConfig;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};
use triage_application::{Oracle, OracleError};

/// Errors raised while constructing the adapter
#[derive(Error, Debug)]
pub enum LlamaError {
    #[error("Invalid oracle endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Oracle backed by the `/completion` endpoint of a llama.cpp server.
///
/// Generation parameters are fixed at construction; one instance is shared
/// by all concurrent traversals.
pub struct LlamaServerOracle {
    client: reqwest::Client,
    completion_url: Url,
    timeout: Duration,
    n_predict: u32,
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
    stop: Vec<String>,
}

impl LlamaServerOracle {
    pub fn new(config: &FileOracleConfig) -> Result<Self, LlamaError> {
        let completion_url = completion_url(&config.endpoint)?;
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        debug!("Oracle endpoint: {}", completion_url);

        Ok(Self {
            client,
            completion_url,
            timeout,
            n_predict: config.n_predict,
            temperature: config.temperature,
            top_p: config.top_p,
            repeat_penalty: config.repeat_penalty,
            stop: config.stop.clone(),
        })
    }

    /// Full URL requests are sent to
    pub fn completion_url(&self) -> &Url {
        &self.completion_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> OracleError {
        if e.is_timeout() {
            OracleError::Timeout(self.timeout)
        } else if e.is_connect() {
            OracleError::Connection(e.to_string())
        } else {
            OracleError::RequestFailed(e.to_string())
        }
    }
}

fn completion_url(endpoint: &str) -> Result<Url, LlamaError> {
    let base = endpoint.trim().trim_end_matches('/');
    Url::parse(&format!("{}/completion", base)).map_err(|e| LlamaError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl Oracle for LlamaServerOracle {
    async fn ask(&self, prompt: &str) -> Result<String, OracleError> {
        let request = CompletionRequest {
            prompt,
            n_predict: self.n_predict,
            temperature: self.temperature,
            top_p: self.top_p,
            repeat_penalty: self.repeat_penalty,
            stop: &self.stop,
        };

        trace!("POST {} ({} prompt bytes)", self.completion_url, prompt.len());

        let response = self
            .client
            .post(self.completion_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(OracleError::RequestFailed(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        parse_completion(&body)
    }
}
