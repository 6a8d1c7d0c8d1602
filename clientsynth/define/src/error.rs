//! Error types for model construction.

use thiserror::Error;

/// Errors raised while building a model from an API-description parser's output.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// A sparse error mapping used a key that is neither the default
    /// sentinel nor a valid HTTP status code.
    #[error("Invalid status code key in error mapping: {code}")]
    InvalidStatusCode {
        /// The offending key.
        code: i32,
    },

    /// An error mapping key that is not an integer.
    #[error("Status code key is not an integer: '{key}'")]
    InvalidStatusKey {
        /// The offending key.
        key: String,
    },
}
