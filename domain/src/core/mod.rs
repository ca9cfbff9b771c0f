//! Core domain concepts shared across all subdomains.
//!
//! - [`label::Label`]: the closed set of classification outcomes
//! - [`string`]: UTF-8 safe excerpt helpers

pub mod label;
pub mod string;
