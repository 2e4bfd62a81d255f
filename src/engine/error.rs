use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the orderflow engine.
///
/// These are *systemic* failures: anything that prevents a run from producing
/// a full report (rule-set fetch failure, malformed rule JSON, a missing
/// order record). Per-action and per-condition failures are deliberately not
/// represented here — they are captured as values (`ActionOutcome`) so one
/// bad rule can never abort the rest of the batch.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum EngineError {
    /// Validation errors in rule definitions
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rule-level errors (bad rule set, rule lookup failures)
    #[error("Rule error: {0}")]
    Rule(String),

    /// Failures talking to the rule, order, or event-log store
    #[error("Store error: {0}")]
    Store(String),

    /// Order record not found in the order store
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// JSON serialization/deserialization errors
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// I/O errors (rule file reading, etc.)
    #[error("IO error: {0}")]
    Io(String),

    /// Any other errors
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl EngineError {
    /// Convert from std::io::Error
    pub fn from_io(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }

    /// Convert from serde_json::Error
    pub fn from_serde(err: serde_json::Error) -> Self {
        EngineError::Deserialization(err.to_string())
    }

    /// Store errors originating from a named backing store
    pub fn store<S: Into<String>>(context: S) -> Self {
        EngineError::Store(context.into())
    }
}

/// Type alias for Result with EngineError
pub type Result<T> = std::result::Result<T, EngineError>;
