//! Infix to postfix conversion for infixcalc
//!
//! A shunting-yard pass over raw tokens. Each raw token is classified once,
//! then numbers and identifiers go straight to the output while operators
//! wait on a stack until precedence and associativity let them out.
//!
//! Signs in operand position (start of input, after `(`, after an operator)
//! are unary: `+` is dropped and `-` becomes a prefix [`Token::Negate`] that
//! binds tighter than `*` and `/` but looser than `^`.

use crate::ast::{join_tokens, Associativity, Operator, Token};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid expression")]
    UnbalancedParentheses,
    #[error("Invalid expression")]
    InvalidToken(String),
    #[error("Invalid expression")]
    RepeatedOperator(String),
}

impl SyntaxError {
    /// Longer description for logs
    pub fn detail(&self) -> String {
        match self {
            SyntaxError::UnbalancedParentheses => "unbalanced parentheses".to_string(),
            SyntaxError::InvalidToken(t) => format!("invalid token '{}'", t),
            SyntaxError::RepeatedOperator(ops) => format!("repeated operator '{}'", ops),
        }
    }
}

/// Should `top` leave the stack before `incoming` is pushed?
fn pops_before(top: &Token, incoming: Operator) -> bool {
    match top {
        // Prefix minus yields only to a right-hand `^`
        Token::Negate => incoming != Operator::Pow,
        Token::Operator(op) => {
            op.precedence() > incoming.precedence()
                || (op.precedence() == incoming.precedence()
                    && incoming.associativity() == Associativity::Left)
        }
        _ => false,
    }
}

/// Converter state
struct Converter {
    output: Vec<Token>,
    stack: Vec<Token>,
    /// True when the next token should start an operand
    expect_operand: bool,
    /// Symbol of the operator just consumed, if the last token was one
    last_operator: Option<char>,
}

impl Converter {
    fn new() -> Self {
        Converter {
            output: Vec::new(),
            stack: Vec::new(),
            expect_operand: true,
            last_operator: None,
        }
    }

    fn push_token(&mut self, raw: &str) -> Result<(), SyntaxError> {
        let token =
            Token::classify(raw).ok_or_else(|| SyntaxError::InvalidToken(raw.to_string()))?;

        match token {
            Token::Number(_) | Token::Identifier(_) => {
                self.output.push(token);
                self.expect_operand = false;
                self.last_operator = None;
            }
            Token::LeftParen => {
                self.stack.push(token);
                self.expect_operand = true;
                self.last_operator = None;
            }
            Token::RightParen => {
                self.close_paren()?;
                self.expect_operand = false;
                self.last_operator = None;
            }
            Token::Operator(op) => {
                self.push_operator(op)?;
                self.expect_operand = true;
                self.last_operator = Some(op.symbol());
            }
            // classify never yields Negate
            Token::Negate => return Err(SyntaxError::InvalidToken(raw.to_string())),
        }
        Ok(())
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), SyntaxError> {
        if self.expect_operand {
            match op {
                Operator::Add => return Ok(()),
                Operator::Sub => {
                    self.stack.push(Token::Negate);
                    return Ok(());
                }
                _ => {
                    if let Some(prev) = self.last_operator {
                        return Err(SyntaxError::RepeatedOperator(format!(
                            "{}{}",
                            prev,
                            op.symbol()
                        )));
                    }
                    // Leading `*` and friends fall through; evaluation reports them
                }
            }
        }

        while let Some(top) = self.stack.last() {
            if !pops_before(top, op) {
                break;
            }
            if let Some(top) = self.stack.pop() {
                self.output.push(top);
            }
        }
        self.stack.push(Token::Operator(op));
        Ok(())
    }

    fn close_paren(&mut self) -> Result<(), SyntaxError> {
        while let Some(top) = self.stack.pop() {
            if top == Token::LeftParen {
                return Ok(());
            }
            self.output.push(top);
        }
        Err(SyntaxError::UnbalancedParentheses)
    }

    fn finish(mut self) -> Result<Vec<Token>, SyntaxError> {
        while let Some(top) = self.stack.pop() {
            if matches!(top, Token::LeftParen | Token::RightParen) {
                return Err(SyntaxError::UnbalancedParentheses);
            }
            self.output.push(top);
        }
        Ok(self.output)
    }
}

/// Convert infix tokens to postfix (Reverse Polish) order
pub fn to_postfix<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Token>, SyntaxError> {
    let mut converter = Converter::new();
    for raw in tokens {
        converter.push_token(raw.as_ref())?;
    }
    let postfix = converter.finish()?;
    tracing::trace!(postfix = %join_tokens(&postfix), "converted to postfix");
    Ok(postfix)
}
