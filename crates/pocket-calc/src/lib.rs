//! Pocket Calculator - keypad expression buffer
//!
//! The engine behind a four-function calculator widget: a text buffer that
//! digit, operator, decimal, equals, clear and backspace events mutate,
//! with a live `= …` preview and reset-after-result semantics. Arithmetic
//! goes through a small dedicated tokenizer and recursive-descent parser,
//! never a general expression language.
//!
//! # Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let mut session = CalculatorSession::new(RecordingSink::new());
//! for key in ["1", "2", "*", "3"] {
//!     session.handle_key(key);
//! }
//! assert_eq!(session.display_state().preview_text, "= 36");
//!
//! session.handle_key("Enter");
//! assert_eq!(session.display_state().buffer_text, "36");
//!
//! // The next digit starts a new expression
//! session.handle_key("5");
//! assert_eq!(session.display_state().buffer_text, "5");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod session;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::evaluator::{ArithmeticEvaluator, Evaluate};
    pub use crate::core::format::{canonical, format_result};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        CalcError, CalcResult, CommitOutcome, ExpressionBuffer, Operation, Symbol,
    };
    pub use crate::display::{DisplayCue, DisplaySink, DisplayState, RecordingSink};
    pub use crate::input::{InputEvent, Keypad, KeypadButton};
    pub use crate::session::CalculatorSession;

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let evaluator = ArithmeticEvaluator::new();
        assert_eq!(evaluator.evaluate("2+3"), Ok(5.0));
    }

    #[test]
    fn test_buffer_direct() {
        let mut buffer = ExpressionBuffer::new();
        for c in "6*7".chars() {
            buffer.append_char(c);
        }
        assert_eq!(buffer.preview(), "= 42");
        assert!(buffer.commit().is_committed());
        assert_eq!(buffer.text(), "42");
    }

    #[test]
    fn test_parser_direct() {
        let ast = Parser::parse_str("1+2*3").unwrap();
        assert_eq!(ArithmeticEvaluator::evaluate_ast(&ast), 7.0);
    }

    #[test]
    fn test_error_handling() {
        let evaluator = ArithmeticEvaluator::new();
        assert!(matches!(
            evaluator.evaluate("1/0"),
            Err(CalcError::NonFiniteResult { .. })
        ));
        assert!(matches!(
            evaluator.evaluate("1+*2"),
            Err(CalcError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_result(0.1 + 0.2, 10), "0.3");
        assert_eq!(canonical(0.1 + 0.2), "0.30000000000000004");
    }
}
