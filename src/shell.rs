//! Line dispatcher for infixcalc
//!
//! The Shell owns the variable store and handles one line at a time:
//! 1. `/exit` and `/help` commands (anything else after `/` is unknown)
//! 2. Assignments (`name = value`)
//! 3. Bare variable lookups
//! 4. Everything else goes through the expression pipeline
//!
//! Failures are reported per line and never change the store.

use crate::eval::{evaluate, EvalError, ExprError};
use crate::lexer::is_identifier;
use crate::parser::SyntaxError;
use crate::state::{AssignmentError, Variables};
use std::fmt;
use thiserror::Error;

pub const HELP_TEXT: &str = "The program supports +, -, *, /, ^ and parentheses ().\n\
It also supports variables and unary minus.";

pub const FAREWELL: &str = "Bye!";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    #[error("Unknown command")]
    UnknownCommand(String),
}

impl From<ExprError> for ShellError {
    fn from(e: ExprError) -> Self {
        match e {
            ExprError::Syntax(e) => ShellError::Syntax(e),
            ExprError::Eval(e) => ShellError::Eval(e),
        }
    }
}

/// What a handled line asks the driver to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print a computed or looked-up value
    Value(i64),
    /// Print the usage text
    Help,
    /// Print the farewell and end the session
    Exit,
    /// Nothing to print (blank line, successful assignment)
    Silent,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Value(n) => write!(f, "{}", n),
            Reply::Help => write!(f, "{}", HELP_TEXT),
            Reply::Exit => write!(f, "{}", FAREWELL),
            Reply::Silent => Ok(()),
        }
    }
}

/// The session that owns all state and dispatches lines
#[derive(Debug, Clone, Default)]
pub struct Shell {
    pub variables: Variables,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing store
    pub fn with_variables(variables: Variables) -> Self {
        Shell { variables }
    }

    /// Handle one input line
    pub fn execute(&mut self, input: &str) -> Result<Reply, ShellError> {
        let line = input.trim();
        tracing::debug!(line, "dispatching");

        if line.is_empty() {
            return Ok(Reply::Silent);
        }

        if let Some(command) = line.strip_prefix('/') {
            return match command {
                "exit" => Ok(Reply::Exit),
                "help" => Ok(Reply::Help),
                _ => Err(ShellError::UnknownCommand(line.to_string())),
            };
        }

        if line.contains('=') {
            self.variables.assign(line)?;
            return Ok(Reply::Silent);
        }

        if is_identifier(line) {
            return self
                .variables
                .get(line)
                .map(Reply::Value)
                .ok_or_else(|| EvalError::UnknownVariable(line.to_string()).into());
        }

        let result = evaluate(line, &self.variables).map_err(|e| {
            if let ExprError::Syntax(ref syntax) = e {
                tracing::debug!(detail = %syntax.detail(), "syntax error");
            }
            e
        })?;
        Ok(Reply::Value(result))
    }
}
