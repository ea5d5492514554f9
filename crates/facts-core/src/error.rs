//! Error types for facts operations.
//!
//! This module defines [`FactsError`] which covers all error cases that can occur
//! when resolving tickers, fetching company facts, or caching documents.

use thiserror::Error;

/// Errors that can occur while resolving, fetching, or normalizing financial facts.
#[derive(Error, Debug)]
pub enum FactsError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// Error parsing data from the upstream service.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A date string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error building a DataFrame.
    #[error("Frame error: {0}")]
    Frame(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`FactsError`].
pub type Result<T> = std::result::Result<T, FactsError>;
