// Error types for prestashop-e2e

use crate::driver::WaitState;
use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the shop
#[derive(Debug, Error)]
pub enum Error {
    /// Element not found by selector
    ///
    /// Raised when a read (text content, checkbox state) targets a selector
    /// that matches nothing on the current page.
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// Waiting for a selector to reach a state exceeded its timeout
    #[error("Timeout after {timeout_ms}ms waiting for selector '{selector}' to be {state}")]
    WaitTimeout {
        selector: String,
        state: WaitState,
        timeout_ms: u64,
    },

    /// Timeout waiting for an operation other than a selector wait
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The page or browser context was already closed
    #[error("Target closed: {0}")]
    TargetClosed(String),

    /// Error raised by the Playwright bindings
    #[error("Browser driver error: {0}")]
    Driver(#[from] playwright_rs::Error),

    /// Expected and actual values differ
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Suite configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid argument provided to a page object
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true when the error is an expected/actual mismatch rather than
    /// an environment failure.
    pub fn is_assertion(&self) -> bool {
        match self {
            Error::Assertion(_) => true,
            Error::Context(_, inner) => inner.is_assertion(),
            _ => false,
        }
    }

    /// Returns true when the error comes from a wait that ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::WaitTimeout { .. } | Error::Timeout(_) => true,
            Error::Driver(playwright_rs::Error::Timeout(_)) => true,
            Error::Context(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }
}
