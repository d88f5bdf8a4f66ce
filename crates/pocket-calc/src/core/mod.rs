//! Core calculator module
//!
//! Tokenizer, parser and evaluator for the four-operator arithmetic
//! grammar, the number formatter, and the expression buffer state machine
//! that sits on top of them.

pub mod buffer;
pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use buffer::{CommitOutcome, ExpressionBuffer, Symbol};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Evaluation failures
///
/// The buffer absorbs both kinds: a commit surfaces the error text and a
/// preview is simply suppressed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The text could not be tokenized or parsed
    #[error("Malformed expression: {message}")]
    MalformedExpression {
        /// What went wrong
        message: String,
    },

    /// Evaluation produced infinity or NaN
    #[error("Non-finite result: {value}")]
    NonFiniteResult {
        /// The offending value
        value: f64,
    },
}

impl CalcError {
    /// Create a malformed expression error
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedExpression {
            message: message.into(),
        }
    }

    /// Returns true for the divide-by-zero / overflow class of failures
    #[must_use]
    pub const fn is_non_finite(&self) -> bool {
        matches!(self, Self::NonFiniteResult { .. })
    }
}

/// Rejects infinity and NaN
pub fn ensure_finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFiniteResult { value })
    }
}
