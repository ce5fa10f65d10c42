use crate::terminal::execute_line;
use infixcalc::Shell;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Startup file, relative to the home directory
pub(crate) const RC_FILE: &str = ".infixcalcrc";

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Load and execute ~/.infixcalcrc if it exists
pub(crate) fn load_rc(shell: &mut Shell) {
    let rc_path = match dirs_home() {
        Some(home) => home.join(RC_FILE),
        None => return,
    };

    let content = match fs::read_to_string(&rc_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    tracing::debug!(path = %rc_path.display(), "loading rc file");
    load_rc_content(shell, &content, "~/.infixcalcrc");
}

/// Execute rc content line by line; bad lines are reported and skipped
pub(crate) fn load_rc_content(shell: &mut Shell, content: &str, source: &str) {
    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Err(e) = execute_line(shell, trimmed, false) {
            tracing::warn!("{} line {}: {}", source, line_num + 1, e);
        }
    }
}
