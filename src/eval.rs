//! Postfix evaluation for infixcalc
//!
//! The evaluator walks a postfix sequence with an integer stack:
//! - Numbers push themselves
//! - Identifiers push their value from the variable store
//! - Operators pop their operands and push the result
//!
//! Exactly one value must remain at the end.

use crate::ast::{Operator, Token};
use crate::lexer::{is_identifier, is_number, normalize, tokenize};
use crate::parser::{to_postfix, SyntaxError};
use crate::state::Variables;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unknown variable")]
    UnknownVariable(String),
    #[error("Invalid identifier")]
    InvalidIdentifier(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid expression")]
    MalformedExpression,
    #[error("Integer overflow")]
    Overflow,
}

/// Any failure of the full expression pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Resolve a raw token to an integer: literal parse or variable lookup
pub fn resolve_value(token: &str, vars: &Variables) -> Result<i64, EvalError> {
    if is_number(token) {
        return token.parse().map_err(|_| EvalError::InvalidIdentifier(token.to_string()));
    }
    if is_identifier(token) {
        return lookup(token, vars);
    }
    Err(EvalError::InvalidIdentifier(token.to_string()))
}

fn lookup(name: &str, vars: &Variables) -> Result<i64, EvalError> {
    vars.get(name).ok_or_else(|| EvalError::UnknownVariable(name.to_string()))
}

/// Integer power through `f64::powf`.
///
/// Known approximation: precision is lost once the result leaves the 53-bit
/// mantissa, negative exponents truncate toward zero and out-of-range results
/// saturate at the `i64` bounds.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn float_pow(base: i64, exp: i64) -> i64 {
    (base as f64).powf(exp as f64) as i64
}

fn apply(op: Operator, a: i64, b: i64) -> Result<i64, EvalError> {
    match op {
        Operator::Add => a.checked_add(b).ok_or(EvalError::Overflow),
        Operator::Sub => a.checked_sub(b).ok_or(EvalError::Overflow),
        Operator::Mul => a.checked_mul(b).ok_or(EvalError::Overflow),
        Operator::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // Truncates toward zero
            a.checked_div(b).ok_or(EvalError::Overflow)
        }
        Operator::Pow => Ok(float_pow(a, b)),
    }
}

/// Evaluate a postfix sequence against a variable store
pub fn evaluate_postfix(postfix: &[Token], vars: &Variables) -> Result<i64, EvalError> {
    let mut stack: Vec<i64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Identifier(name) => stack.push(lookup(name, vars)?),
            Token::Operator(op) => {
                let b = stack.pop().ok_or(EvalError::MalformedExpression)?;
                let a = stack.pop().ok_or(EvalError::MalformedExpression)?;
                stack.push(apply(*op, a, b)?);
            }
            Token::Negate => {
                let a = stack.pop().ok_or(EvalError::MalformedExpression)?;
                stack.push(a.checked_neg().ok_or(EvalError::Overflow)?);
            }
            Token::LeftParen | Token::RightParen => return Err(EvalError::MalformedExpression),
        }
        tracing::trace!(%token, stack = ?stack, "evaluated");
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::MalformedExpression),
    }
}

/// Run the whole pipeline: normalize, tokenize, convert, evaluate
pub fn evaluate(expr: &str, vars: &Variables) -> Result<i64, ExprError> {
    let normalized = normalize(expr);
    let tokens = tokenize(&normalized);
    tracing::trace!(normalized = %normalized, ?tokens, "tokenized");
    let postfix = to_postfix(&tokens)?;
    Ok(evaluate_postfix(&postfix, vars)?)
}
