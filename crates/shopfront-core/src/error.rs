//! Error types for the shopfront UI controllers.
//!
//! This module provides error handling using [`thiserror`] for automatic
//! `Display` and `Error` trait implementations.
//!
//! # Error Hierarchy
//!
//! - [`CoreError`]: Top-level error type returned by configuration and boot
//! - [`DomError`]: Errors raised by a [`Document`](crate::dom::Document)
//!   implementation while reading or mutating the page
//!
//! Controllers never let a [`DomError`] escape their own event handlers. The
//! page keeps working with whatever was already rendered; the failure is
//! logged and the handler returns.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// A specialized `Result` type for document operations.
pub type DomResult<T> = Result<T, DomError>;

/// Top-level error type for the shopfront controllers.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoreError {
    /// Document access error
    #[error("Document error: {0}")]
    Dom(#[from] DomError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },
}

impl CoreError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if the page can keep running after this error.
    ///
    /// Document errors only ever cost a single cosmetic behavior, while a bad
    /// configuration means nothing should be attached.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Dom(_))
    }
}

/// Errors raised by a document implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomError {
    /// The runtime lacks a capability (e.g. viewport intersection observation)
    #[error("Unsupported capability: {capability}")]
    Unsupported {
        /// Name of the missing capability
        capability: &'static str,
    },

    /// A selector could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The rejected selector
        selector: String,
        /// Why the selector was rejected
        reason: String,
    },

    /// A DOM call failed
    #[error("{operation} failed: {reason}")]
    Operation {
        /// The DOM operation that failed
        operation: &'static str,
        /// Failure description reported by the runtime
        reason: String,
    },
}

impl DomError {
    /// Creates a new unsupported-capability error.
    #[must_use]
    pub fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    /// Creates a new invalid-selector error.
    #[must_use]
    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new failed-operation error.
    #[must_use]
    pub fn operation(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Operation {
            operation,
            reason: reason.into(),
        }
    }
}
