use infixcalc::{evaluate, is_number, Shell, Variables};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;
use std::io::{self, BufRead};
use std::process::ExitCode;

use crate::rcfile::{dirs_home, load_rc};
use crate::terminal::{run_line, Flow};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = "> ";
const HISTORY_FILE: &str = ".infixcalc_history";

/// Commands offered by tab completion
const COMMANDS: [&str; 2] = ["/exit", "/help"];

/// Helper for rustyline with tab completion and a live result hint
struct CalcHelper {
    /// Snapshot of the session store, refreshed before every prompt
    variables: Variables,
    /// Off in trace mode so hints do not flood the log
    hints: bool,
}

impl Helper for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the word being completed
        let start = line[..pos]
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_ascii_alphabetic() || *c == '/'))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let prefix = &line[start..pos];

        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }

        let completions: Vec<String> = if prefix.starts_with('/') {
            COMMANDS
                .iter()
                .filter(|c| c.starts_with(prefix))
                .map(|c| c.to_string())
                .collect()
        } else {
            self.variables
                .names()
                .into_iter()
                .filter(|name| name.starts_with(prefix))
                .collect()
        };

        let pairs: Vec<Pair> = completions
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();

        Ok((start, pairs))
    }
}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        // Preview the value of the expression being typed
        if !self.hints || pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('/')
            || trimmed.contains('=')
            || is_number(trimmed)
        {
            return None;
        }
        evaluate(trimmed, &self.variables)
            .ok()
            .map(|value| format!("  = {}", value))
    }
}

impl Highlighter for CalcHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        false
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        // Dim the result hint
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for CalcHelper {}

/// Run the interactive line-editing session
pub(crate) fn run_repl(trace: bool) -> RlResult<()> {
    let mut rl: Editor<CalcHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CalcHelper {
        variables: Variables::new(),
        hints: !trace,
    }));

    let mut shell = Shell::new();
    load_rc(&mut shell);

    // Try to load history
    let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    // Show banner only if INFIXCALC_BANNER is set
    if std::env::var("INFIXCALC_BANNER").is_ok() {
        println!("infixcalc {} - type /help for usage, /exit or Ctrl-D to quit", VERSION);
    }

    loop {
        // Refresh the helper's view of the store for completion and hints
        if let Some(helper) = rl.helper_mut() {
            helper.variables = shell.variables.clone();
        }

        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if run_line(&mut shell, &line) == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C - drop the current line, keep the session
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D - exit
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Run a session over non-interactive stdin: no prompt, no editing
pub(crate) fn run_piped() -> ExitCode {
    let mut shell = Shell::new();
    load_rc(&mut shell);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if run_line(&mut shell, &line) == Flow::Exit {
            break;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::Context;

    fn helper(bindings: &[(&str, i64)]) -> CalcHelper {
        let mut variables = Variables::new();
        for (name, value) in bindings {
            variables.set(name, *value).unwrap();
        }
        CalcHelper {
            variables,
            hints: true,
        }
    }

    fn completions(helper: &CalcHelper, line: &str) -> (usize, Vec<String>) {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let (start, pairs) = helper.complete(line, line.len(), &ctx).unwrap();
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    fn hint_at(helper: &CalcHelper, line: &str, pos: usize) -> Option<String> {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        helper.hint(line, pos, &ctx)
    }

    #[test]
    fn completes_commands() {
        let h = helper(&[]);
        assert_eq!(completions(&h, "/e"), (0, vec!["/exit".to_string()]));
        assert_eq!(
            completions(&h, "/"),
            (0, vec!["/exit".to_string(), "/help".to_string()])
        );
    }

    #[test]
    fn completes_variable_names() {
        let h = helper(&[("width", 80), ("height", 24), ("wide", 1)]);
        assert_eq!(
            completions(&h, "1 + wi"),
            (4, vec!["wide".to_string(), "width".to_string()])
        );
        assert_eq!(completions(&h, "(hei"), (1, vec!["height".to_string()]));
        assert_eq!(completions(&h, "1 + "), (4, Vec::new()));
    }

    #[test]
    fn hints_value_of_expression() {
        let h = helper(&[("x", 5)]);
        let line = "x + 1";
        assert_eq!(hint_at(&h, line, line.len()), Some("  = 6".to_string()));
    }

    #[test]
    fn no_hint_for_non_expressions() {
        let h = helper(&[("x", 5)]);
        for line in ["a = 1", "/help", "42", "", "x +", "y * 2"] {
            assert_eq!(hint_at(&h, line, line.len()), None, "{}", line);
        }
    }

    #[test]
    fn no_hint_with_cursor_inside_line() {
        let h = helper(&[("x", 5)]);
        assert_eq!(hint_at(&h, "x + 1", 2), None);
    }

    #[test]
    fn no_hint_when_disabled() {
        let mut h = helper(&[("x", 5)]);
        h.hints = false;
        assert_eq!(hint_at(&h, "x + 1", 5), None);
    }
}
