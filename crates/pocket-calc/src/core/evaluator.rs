//! AST evaluator
//!
//! [`Evaluate`] is the capability the expression buffer depends on. Hosts
//! may plug in their own; [`ArithmeticEvaluator`] is the default.

use crate::core::parser::{AstNode, Parser};
use crate::core::{ensure_finite, CalcResult};

/// Evaluates arithmetic text to a finite number
pub trait Evaluate {
    /// Evaluates `text`, failing on malformed input or a non-finite result
    fn evaluate(&self, text: &str) -> CalcResult<f64>;
}

impl<F> Evaluate for F
where
    F: Fn(&str) -> CalcResult<f64>,
{
    fn evaluate(&self, text: &str) -> CalcResult<f64> {
        self(text)
    }
}

/// Tokenize-parse-walk evaluator for the `+ - * /` grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticEvaluator;

impl ArithmeticEvaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Walks an AST with IEEE-754 semantics (no finiteness check)
    #[must_use]
    pub fn evaluate_ast(node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -Self::evaluate_ast(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(Self::evaluate_ast(left), Self::evaluate_ast(right))
            }
        }
    }
}

impl Evaluate for ArithmeticEvaluator {
    fn evaluate(&self, text: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(text)?;
        ensure_finite(Self::evaluate_ast(&ast))
    }
}
