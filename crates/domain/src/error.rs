//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A scenario does not carry exactly three options with a matching
    /// consequence for each one.
    #[error("Malformed scenario: {0}")]
    MalformedScenario(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create a malformed scenario error.
    ///
    /// # Example
    /// ```ignore
    /// if options.len() != 3 {
    ///     return Err(DomainError::malformed_scenario("expected 3 options"));
    /// }
    /// ```
    pub fn malformed_scenario(msg: impl Into<String>) -> Self {
        Self::MalformedScenario(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this error flags a structurally broken scenario.
    pub fn is_malformed_scenario(&self) -> bool {
        matches!(self, Self::MalformedScenario(_))
    }
}
