//! infixcalc - interactive integer calculator
//!
//! Usage:
//!   infixcalc              Start interactive session
//!   infixcalc -c "line"    Execute a single line
//!   infixcalc script.calc  Execute a script file

mod cli;
mod rcfile;
mod repl;
mod terminal;

use cli::{execute_command, execute_script, parse_args, print_help, print_version};
use repl::{run_piped, run_repl};
use std::env;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr; `--trace` overrides INFIXCALC_LOG
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("infixcalc=trace")
    } else {
        EnvFilter::try_from_env("INFIXCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    init_logging(cli.trace);

    if let Some(err) = cli.usage_error {
        eprintln!("Error: {}", err);
        eprintln!("Try 'infixcalc --help' for usage.");
        return ExitCode::FAILURE;
    }

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    if let Some(cmd) = cli.command {
        return execute_command(&cmd);
    }

    if let Some(script) = cli.script {
        return execute_script(&script);
    }

    // Piped input gets the same session without line editing
    if !std::io::stdin().is_terminal() {
        return run_piped();
    }

    match run_repl(cli.trace) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
