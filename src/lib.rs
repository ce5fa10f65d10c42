//! infixcalc - an interactive integer calculator
//!
//! # Overview
//!
//! infixcalc reads a line of infix arithmetic over integers and named
//! variables and answers with an integer or a one-line diagnostic.
//!
//! ```text
//! a = 4
//! b = a
//! a * (b - 1) ^ 2      # 36
//! 2 ^ 3 ^ 2            # 512, ^ is right-associative
//! 8 --- 3              # 5, sign runs collapse
//! -7 / 2               # -3, division truncates toward zero
//! ```
//!
//! # Pipeline
//!
//! ```text
//! line -> normalize -> tokenize -> to_postfix -> evaluate_postfix -> i64
//! ```
//!
//! - [`lexer::normalize`] collapses runs of `+`/`-`
//! - [`lexer::tokenize`] splits around `( ) + - * / ^`
//! - [`parser::to_postfix`] is a shunting-yard converter
//! - [`eval::evaluate_postfix`] runs the postfix sequence on an integer stack
//!
//! The [`Shell`] wraps the pipeline with `/`-commands, assignments and
//! variable lookups, owning a [`Variables`] store per session.
//!
//! # Example
//!
//! ```rust
//! use infixcalc::{Reply, Shell};
//!
//! let mut shell = Shell::new();
//! shell.execute("x = 5").unwrap();
//! assert_eq!(shell.execute("x * -2 + 1").unwrap(), Reply::Value(-9));
//! ```

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod shell;
pub mod state;

// Re-export commonly used items
pub use ast::{Associativity, Operator, Token};
pub use eval::{evaluate, evaluate_postfix, resolve_value, EvalError, ExprError};
pub use lexer::{is_identifier, is_number, normalize, tokenize};
pub use parser::{to_postfix, SyntaxError};
pub use shell::{Reply, Shell, ShellError};
pub use state::{AssignmentError, Variables};
