//! Common test utilities for infixcalc integration tests

pub use infixcalc::{Reply, Shell, ShellError, Variables};

/// Helper to evaluate one expression in a fresh session
pub fn eval(input: &str) -> Result<i64, String> {
    let mut shell = Shell::new();
    match shell.execute(input).map_err(|e| e.to_string())? {
        Reply::Value(n) => Ok(n),
        other => Err(format!("expected a value, got {:?}", other)),
    }
}

/// Helper to run lines through one session and collect what a user would see
#[allow(dead_code)]
pub fn session(lines: &[&str]) -> Vec<String> {
    let mut shell = Shell::new();
    let mut output = Vec::new();
    for line in lines {
        match shell.execute(line) {
            Ok(Reply::Silent) => {}
            Ok(reply) => output.push(reply.to_string()),
            Err(e) => output.push(e.to_string()),
        }
    }
    output
}
