//! Unified error types for the project-board application.

use std::fmt;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised by a store listener while handling a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Project store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// A listener tried to subscribe or mutate while a notification was running
    #[error("store accessed re-entrantly during notification")]
    Reentrant,
}

/// Why a single form value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("value is required")]
    Required,

    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("must be at least {min} (got {actual})")]
    BelowMinimum { min: i64, actual: i64 },

    #[error("must be at most {max} (got {actual})")]
    AboveMaximum { max: i64, actual: i64 },
}

/// Form field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    People,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::People => "People",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rejected form submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {source}")]
pub struct FormError {
    pub field: FormField,
    #[source]
    pub source: ValidationError,
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
