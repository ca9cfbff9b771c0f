//! Batch progress reporters

pub mod reporter;
