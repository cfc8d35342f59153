//! CLI command implementations.

pub mod keywords;
pub mod search;
pub mod stats;
