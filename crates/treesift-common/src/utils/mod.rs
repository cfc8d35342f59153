//! Common utilities used throughout treesift.
//!
//! - [`error`] - Error types like [`Error`] and [`ConfigError`]

pub mod error;

pub use error::{ConfigError, Error, Result};
