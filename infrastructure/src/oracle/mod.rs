//! Oracle adapters
//!
//! [`LlamaServerOracle`] answers questions through a llama.cpp HTTP server.

mod llama;
mod types;

pub use llama::{LlamaError, LlamaServerOracle};
