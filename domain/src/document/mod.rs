//! Documents and their traversal traces.

pub mod entities;
pub mod trace;

pub use entities::Document;
pub use trace::{Answer, TraceEntry};
