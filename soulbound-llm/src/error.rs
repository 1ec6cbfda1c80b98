//! Generator error types.

use thiserror::Error;

/// Errors that can occur while talking to the narrative generator.
///
/// Every variant is recoverable from the engine's point of view: the
/// adapter catches all of them and falls back to the built-in selector.
#[derive(Debug, Error)]
pub enum GenError {
    /// Generator response was not valid JSON.
    #[error("failed to parse generator response as JSON: {0}")]
    ParseError(String),

    /// Generator provider is unavailable.
    #[error("generator unavailable: {0}")]
    Unavailable(String),

    /// All retry attempts exhausted.
    #[error("all generator retries exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// The final failure.
        last_error: String,
    },
}
