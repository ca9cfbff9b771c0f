//! Oracle configuration from TOML (`[oracle]` section)

use serde::{Deserialize, Serialize};

/// Raw oracle configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    /// Base URL of the llama.cpp server
    pub endpoint: String,
    /// Maximum tokens generated per answer
    pub n_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    /// Stop sequences
    pub stop: Vec<String>,
    /// Timeout in seconds for a single oracle call
    pub timeout_seconds: u64,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            n_predict: 300,
            temperature: 0.1,
            top_p: 0.95,
            repeat_penalty: 1.1,
            stop: vec!["</s>".to_string()],
            timeout_seconds: 120,
        }
    }
}
