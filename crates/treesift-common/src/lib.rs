//! Shared building blocks for treesift.
//!
//! Everything here is used by more than one crate in the workspace:
//!
//! - [`types`] - Identifier types like [`KeywordId`](types::KeywordId)
//! - [`collections`] - Hash map and set aliases with a fixed fast hasher
//! - [`utils`] - The error taxonomy ([`Error`], [`Result`], [`ConfigError`])

pub mod collections;
pub mod types;
pub mod utils;

pub use utils::error::{ConfigError, Error, Result};
