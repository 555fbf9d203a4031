//! Error types for link generation.
//!
//! Every failure a caller can observe is a single descriptive value:
//!
//! - `ParseError`: the destination string does not match the grammar
//! - `DirectoryError`: the presenter name is invalid or unknown
//! - `BindingError`: arguments do not fit the target signature
//! - `LinkError`: wraps the above, plus the router finding no route
//!
//! `Error` is the crate-level type used by configuration loading and setup code.

use std::path::PathBuf;
use thiserror::Error;

/// Destination string does not match `presenter:action#fragment`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid link destination '{destination}'.")]
pub struct ParseError {
    pub destination: String,
}

impl ParseError {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

/// Handler directory lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Presenter name must be alphanumeric string, '{0}' is invalid.")]
    InvalidName(String),

    #[error("Cannot load presenter '{presenter}', class '{class}' was not found.")]
    NotFound { presenter: String, class: String },
}

/// Arguments that cannot be bound to a handler member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("Invalid value for parameter '{parameter}' in method {handler}::{method}(), expected {expected}.")]
    InvalidValue {
        parameter: String,
        handler: String,
        method: String,
        /// Expected type label; untyped parameters expect "scalar".
        expected: String,
    },

    #[error("Passed more parameters than method {handler}::{method}() expects.")]
    TooManyArguments {
        handler: String,
        method: String,
        /// Positional arguments left over after binding.
        unconsumed: usize,
    },
}

/// Invalid handler signature declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Duplicate parameter '{name}' in signature.")]
    DuplicateParameter { name: String },
}

/// Failure to produce a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error(transparent)]
    Destination(#[from] ParseError),

    #[error(transparent)]
    Presenter(#[from] DirectoryError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    /// The router has no route for the request; `params` is a decoded rendering.
    #[error("No route for {destination}({params})")]
    NoRoute { destination: String, params: String },
}

/// Main error type for setup and configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: None,
        }
    }

    pub fn configuration_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
