//! Expression tokenizer and parser
//!
//! The grammar is deliberately small: decimal literals, the four binary
//! operators and a leading sign. Anything else is a malformed expression.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (or sign, depending on position)
    Operator(Operation),
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number().map(Some);
        }

        match Operation::from_char(ch) {
            Some(op) => {
                self.advance();
                Ok(Some(Token::Operator(op)))
            }
            None => Err(CalcError::malformed(format!(
                "Unexpected character: '{ch}'"
            ))),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;
        let mut has_digit = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                has_digit = true;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        if !has_digit {
            return Err(CalcError::malformed(format!("Invalid number: '{num_str}'")));
        }

        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::malformed(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('+' | '-')* NUMBER
/// ```
///
/// Inputs longer than [`Parser::MAX_TOKENS`] are rejected so the tree
/// stays shallow enough to walk recursively.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Longest accepted token stream
    pub const MAX_TOKENS: usize = 4096;

    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::malformed("Empty expression"));
        }
        if self.tokens.len() > Self::MAX_TOKENS {
            return Err(CalcError::malformed(format!(
                "Expression too long: {} tokens (max {})",
                self.tokens.len(),
                Self::MAX_TOKENS
            )));
        }

        let ast = self.parse_expression()?;

        if self.pos < self.tokens.len() {
            return Err(CalcError::malformed(format!(
                "Unexpected token at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let mut negative = false;

        loop {
            let token = self
                .advance()
                .cloned()
                .ok_or_else(|| CalcError::malformed("Unexpected end of expression"))?;

            match token {
                Token::Number(n) => {
                    let number = AstNode::number(n);
                    return Ok(if negative {
                        AstNode::negate(number)
                    } else {
                        number
                    });
                }
                Token::Operator(Operation::Subtract) => negative = !negative,
                Token::Operator(Operation::Add) => {}
                Token::Operator(op) => {
                    return Err(CalcError::malformed(format!(
                        "Unexpected operator: '{op}'"
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_decimal_number() {
        let tokens = Tokenizer::new("3.14").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(3.14)]);
    }

    #[test]
    fn test_tokenize_leading_and_trailing_decimal() {
        assert_eq!(
            Tokenizer::new(".5").tokenize().unwrap(),
            vec![Token::Number(0.5)]
        );
        assert_eq!(
            Tokenizer::new("5.").tokenize().unwrap(),
            vec![Token::Number(5.0)]
        );
    }

    #[test]
    fn test_tokenize_expression_without_spaces() {
        let tokens = Tokenizer::new("2+3*4").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(Operation::Add),
                Token::Number(3.0),
                Token::Operator(Operation::Multiply),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_display_glyphs() {
        let tokens = Tokenizer::new("6×2÷3").tokenize().unwrap();
        assert_eq!(tokens[1], Token::Operator(Operation::Multiply));
        assert_eq!(tokens[3], Token::Operator(Operation::Divide));
    }

    #[test]
    fn test_tokenize_lone_dot_is_malformed() {
        let result = Tokenizer::new(".").tokenize();
        assert!(matches!(result, Err(CalcError::MalformedExpression { .. })));
    }

    #[test]
    fn test_tokenize_rejects_unsupported_characters() {
        for input in ["2 % 3", "(1)", "2^3", "Error", "1e5"] {
            let result = Tokenizer::new(input).tokenize();
            assert!(
                matches!(result, Err(CalcError::MalformedExpression { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(Tokenizer::new("").tokenize().unwrap().is_empty());
        assert!(Tokenizer::new("   ").tokenize().unwrap().is_empty());
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), AstNode::Number(42.0));
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        let ast = Parser::parse_str("2+3*4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(
                    AstNode::number(3.0),
                    Operation::Multiply,
                    AstNode::number(4.0)
                ),
            )
        );
    }

    #[test]
    fn test_parse_left_associative_subtraction() {
        // 8-3-2 = (8-3)-2
        let ast = Parser::parse_str("8-3-2").unwrap();
        match ast {
            AstNode::BinaryOp {
                left,
                op: Operation::Subtract,
                right,
            } => {
                assert_eq!(*right, AstNode::Number(2.0));
                assert!(matches!(
                    *left,
                    AstNode::BinaryOp {
                        op: Operation::Subtract,
                        ..
                    }
                ));
            }
            _ => panic!("Expected Subtract at top level"),
        }
    }

    #[test]
    fn test_parse_leading_minus() {
        assert_eq!(
            Parser::parse_str("-5").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_leading_plus_is_identity() {
        assert_eq!(Parser::parse_str("+5").unwrap(), AstNode::Number(5.0));
    }

    #[test]
    fn test_parse_sign_run_collapses() {
        assert_eq!(Parser::parse_str("--5").unwrap(), AstNode::Number(5.0));
        assert_eq!(Parser::parse_str("-+-5").unwrap(), AstNode::Number(5.0));
        assert_eq!(
            Parser::parse_str("---5").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_long_sign_run_is_rejected() {
        let input = format!("{}1", "-".repeat(100_000));
        let result = Parser::parse_str(&input);
        assert!(matches!(result, Err(CalcError::MalformedExpression { .. })));
    }

    #[test]
    fn test_parse_long_chain_is_rejected() {
        let input = vec!["1"; 10_000].join("+");
        let result = Parser::parse_str(&input);
        assert!(matches!(result, Err(CalcError::MalformedExpression { .. })));
    }

    #[test]
    fn test_parse_at_token_limit() {
        // 4095 tokens
        let input = vec!["1"; 2048].join("+");
        let ast = Parser::parse_str(&input).unwrap();
        assert!(matches!(ast, AstNode::BinaryOp { .. }));
    }

    #[test]
    fn test_parse_signed_right_operand() {
        let ast = Parser::parse_str("3*-2").unwrap();
        match ast {
            AstNode::BinaryOp { right, .. } => {
                assert_eq!(*right, AstNode::negate(AstNode::number(2.0)));
            }
            _ => panic!("Expected BinaryOp"),
        }
    }

    #[test]
    fn test_parse_trailing_operator() {
        let result = Parser::parse_str("2+");
        assert!(matches!(result, Err(CalcError::MalformedExpression { .. })));
    }

    #[test]
    fn test_parse_operator_after_operator() {
        let result = Parser::parse_str("2+*3");
        assert!(matches!(result, Err(CalcError::MalformedExpression { .. })));
    }

    #[test]
    fn test_parse_adjacent_numbers() {
        // "1.2.3" tokenizes to 1.2 and .3
        let result = Parser::parse_str("1.2.3");
        assert!(matches!(result, Err(CalcError::MalformedExpression { .. })));
    }

    #[test]
    fn test_parse_empty_expression() {
        assert!(Parser::parse_str("").is_err());
        assert!(Parser::parse_str("  ").is_err());
    }

    #[test]
    fn test_parser_parse_empty_tokens() {
        let mut parser = Parser::new(vec![]);
        assert!(matches!(
            parser.parse(),
            Err(CalcError::MalformedExpression { .. })
        ));
    }
}
