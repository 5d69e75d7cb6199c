//! Unified error type definition

use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Missing or malformed API credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// Since-date string that is not an ISO-8601 date or date-time
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Dialog identifier not resolvable or not accessible
    #[error("Dialog not found or not accessible: {0}")]
    DialogNotFound(i64),

    /// Session bootstrap failure (connect or authorization)
    #[error("Session error: {0}")]
    Session(String),

    /// Error surfaced by the messaging client library, message preserved
    #[error("{0}")]
    Client(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidDate(_) | Self::DialogNotFound(_)
        )
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
