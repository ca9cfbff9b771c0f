//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify_document;
pub mod evaluate;
pub mod run_batch;
