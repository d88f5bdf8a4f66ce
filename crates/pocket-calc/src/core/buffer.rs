//! Expression buffer state machine
//!
//! The buffer holds a partially typed expression such as `12.5*3-`. Four
//! operations mutate it (append, delete-last, clear-all, commit) and every
//! mutation recomputes the live preview. The text is never empty at rest,
//! never holds two operators in a row, and never holds two decimal points
//! in one number. Invalid transitions are absorbed as no-ops.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::CalculatorConfig;
use crate::core::evaluator::{ArithmeticEvaluator, Evaluate};
use crate::core::format::{canonical, format_result};
use crate::core::{ensure_finite, CalcError, Operation};

/// Text of an empty buffer
const EMPTY_TEXT: &str = "0";

/// A single logical input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A digit (0-9)
    Digit(u8),
    /// The decimal point
    Decimal,
    /// A binary operator
    Operator(Operation),
}

impl Symbol {
    /// Creates a digit symbol, rejecting values above 9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Parses a buffer character (operator display glyphs are accepted)
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Self::digit(c as u8 - b'0'),
            '.' => Some(Self::Decimal),
            _ => Operation::from_char(c).map(Self::Operator),
        }
    }

    /// Returns the character stored in the buffer for this symbol
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.symbol()),
        }
    }

    /// Returns true for operator symbols
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }
}

/// What the display should show, recomputed after every mutation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayState {
    /// The expression (or committed result)
    pub buffer_text: String,
    /// `"= …"` preview, the error text after a failed commit, or empty
    pub preview_text: String,
}

/// Result of [`ExpressionBuffer::commit`]
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Nothing to evaluate (buffer was `0` or empty)
    Skipped,
    /// The expression evaluated and the buffer now shows the result
    Committed {
        /// Raw result
        value: f64,
        /// Result as rendered into the buffer
        text: String,
    },
    /// Evaluation failed; the error text is on display
    Failed(CalcError),
}

impl CommitOutcome {
    /// Returns true if the commit produced a result
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// The calculator's expression buffer
///
/// Owned by a session; construct one per session and drop it at the end.
#[derive(Debug, Clone)]
pub struct ExpressionBuffer<E = ArithmeticEvaluator> {
    text: String,
    awaiting_reset: bool,
    last_result: Option<f64>,
    preview: String,
    config: CalculatorConfig,
    evaluator: E,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    /// Creates an empty buffer with the built-in evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates an empty buffer with custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self::with_evaluator(ArithmeticEvaluator::new(), config)
    }
}

impl<E: Evaluate> ExpressionBuffer<E> {
    /// Creates an empty buffer backed by a host-supplied evaluator
    #[must_use]
    pub fn with_evaluator(evaluator: E, config: CalculatorConfig) -> Self {
        Self {
            text: EMPTY_TEXT.to_string(),
            awaiting_reset: false,
            last_result: None,
            preview: String::new(),
            config,
            evaluator,
        }
    }

    /// Current buffer text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current preview / result line (empty when nothing applies)
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// True right after a commit; the next append starts fresh
    #[must_use]
    pub const fn is_awaiting_reset(&self) -> bool {
        self.awaiting_reset
    }

    /// Most recently committed value
    #[must_use]
    pub const fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Projection for the display sink
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            buffer_text: self.text.clone(),
            preview_text: self.preview.clone(),
        }
    }

    /// The trailing run of characters after the last operator
    #[must_use]
    pub fn last_number(&self) -> &str {
        let start = self
            .text
            .rfind(Operation::is_operator_char)
            .map_or(0, |i| i + 1);
        &self.text[start..]
    }

    fn ends_with_operator(&self) -> bool {
        self.text
            .chars()
            .next_back()
            .is_some_and(Operation::is_operator_char)
    }

    /// Appends a symbol, applying the decimal and operator guards
    pub fn append(&mut self, symbol: Symbol) {
        let Some(c) = symbol.as_char() else {
            trace!(?symbol, "ignoring out-of-range symbol");
            return;
        };

        if self.awaiting_reset {
            self.text.clear();
            self.awaiting_reset = false;
            self.preview.clear();
        }

        if self.text == EMPTY_TEXT && symbol != Symbol::Decimal {
            if symbol.is_operator() {
                self.text.push(c);
            } else {
                self.text = c.to_string();
            }
        } else if symbol == Symbol::Decimal {
            if self.last_number().contains('.') {
                trace!(text = %self.text, "number already has a decimal point");
                return;
            }
            self.text.push(c);
        } else if symbol.is_operator() && self.ends_with_operator() {
            // One pending operator; the newest wins
            self.text.pop();
            self.text.push(c);
        } else {
            self.text.push(c);
        }

        trace!(symbol = %c, text = %self.text, "append");
        self.refresh_preview();
    }

    /// Appends a character if it maps to a symbol; returns whether it did
    pub fn append_char(&mut self, c: char) -> bool {
        match Symbol::from_char(c) {
            Some(symbol) => {
                self.append(symbol);
                true
            }
            None => false,
        }
    }

    /// Removes the last character, or clears everything after a commit
    pub fn delete_last(&mut self) {
        if self.awaiting_reset {
            self.clear_all();
            return;
        }

        self.text.pop();
        if self.text.is_empty() {
            self.text.push_str(EMPTY_TEXT);
        }

        trace!(text = %self.text, "delete_last");
        self.refresh_preview();
    }

    /// Resets the buffer to `0` and forgets the last result
    pub fn clear_all(&mut self) {
        self.text = EMPTY_TEXT.to_string();
        self.awaiting_reset = false;
        self.last_result = None;
        self.preview.clear();
        trace!("clear_all");
    }

    /// Evaluates the buffer and replaces it with the result
    ///
    /// Failures never escape: a non-finite result replaces the text with
    /// the error text, a malformed expression leaves the text alone, and
    /// both put the error text on the preview line and arm the reset.
    pub fn commit(&mut self) -> CommitOutcome {
        if self.text.is_empty() || self.text == EMPTY_TEXT {
            return CommitOutcome::Skipped;
        }

        match self.evaluator.evaluate(&self.text).and_then(ensure_finite) {
            Ok(value) => {
                let formatted = format_result(value, self.config.decimal_places);
                debug!(expression = %self.text, result = %formatted, "commit");
                self.preview.clear();
                self.text.clone_from(&formatted);
                self.last_result = Some(value);
                self.awaiting_reset = true;
                CommitOutcome::Committed {
                    value,
                    text: formatted,
                }
            }
            Err(err) => {
                debug!(expression = %self.text, error = %err, "commit failed");
                if err.is_non_finite() {
                    self.text.clone_from(&self.config.error_text);
                }
                self.preview.clone_from(&self.config.error_text);
                self.awaiting_reset = true;
                CommitOutcome::Failed(err)
            }
        }
    }

    fn refresh_preview(&mut self) {
        self.preview = self.compute_preview().unwrap_or_default();
    }

    fn compute_preview(&self) -> Option<String> {
        if !self.config.live_preview
            || self.text.is_empty()
            || self.text == EMPTY_TEXT
            || self.ends_with_operator()
        {
            return None;
        }

        let value = self
            .evaluator
            .evaluate(&self.text)
            .and_then(ensure_finite)
            .ok()?;

        if canonical(value) == self.text {
            return None;
        }

        Some(format!(
            "= {}",
            format_result(value, self.config.decimal_places)
        ))
    }
}
