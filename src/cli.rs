use crate::rcfile::load_rc;
use crate::terminal::{execute_line, Flow};
use infixcalc::Shell;
use std::fs;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
    /// Set when the arguments cannot be run as given
    pub(crate) usage_error: Option<String>,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => {
                cli.trace = true;
            }
            "-c" => {
                // Everything after -c is the line to run
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                } else {
                    cli.usage_error = Some("-c requires a line to execute".to_string());
                }
                break;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"infixcalc {} - interactive integer calculator

USAGE:
    infixcalc                   Start interactive session
    infixcalc -c <line>         Execute a single line
    infixcalc <script>          Execute a script file, one line at a time
    infixcalc --trace           Log every pipeline step to stderr
    infixcalc --help            Show this help message
    infixcalc --version         Show version

STARTUP:
    ~/.infixcalcrc              Executed on startup (if exists)
    INFIXCALC_LOG=<filter>      Log filter (default: warn)
    INFIXCALC_BANNER=1          Show startup banner

INPUT:
    <expression>                Integers, variables, + - * / ^ and ( )
    <name> = <value>            Bind a variable to a number or another variable
    <name>                      Print a variable
    /help                       Show usage
    /exit                       Quit

EXAMPLES:
    a = 4
    b = a
    a * (b - 1) ^ 2             # 36
    2 ^ 3 ^ 2                   # 512
    8 --- 3                     # 5
    -7 / 2                      # -3
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("infixcalc {}", VERSION);
}

/// Execute a single line
pub(crate) fn execute_command(cmd: &str) -> ExitCode {
    let mut shell = Shell::new();
    load_rc(&mut shell);

    match execute_line(&mut shell, cmd, true) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a script file
pub(crate) fn execute_script(path: &str) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut shell = Shell::new();
    load_rc(&mut shell);

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match execute_line(&mut shell, trimmed, true) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error at line {}: {}", line_num + 1, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("infixcalc")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_arguments() {
        let cli = parse_args(&args(&[]));
        assert!(cli.command.is_none());
        assert!(cli.script.is_none());
        assert!(!cli.help && !cli.version && !cli.trace);
    }

    #[test]
    fn command_takes_the_rest() {
        let cli = parse_args(&args(&["--trace", "-c", "1", "+", "2"]));
        assert!(cli.trace);
        assert_eq!(cli.command.as_deref(), Some("1 + 2"));
    }

    #[test]
    fn script_and_flags() {
        let cli = parse_args(&args(&["calc.txt", "-V"]));
        assert_eq!(cli.script.as_deref(), Some("calc.txt"));
        assert!(cli.version);

        let cli = parse_args(&args(&["-h", "--unknown"]));
        assert!(cli.help);
        assert!(cli.script.is_none());
    }

    #[test]
    fn trailing_command_flag_is_a_usage_error() {
        let cli = parse_args(&args(&["--trace", "-c"]));
        assert!(cli.command.is_none());
        assert_eq!(
            cli.usage_error.as_deref(),
            Some("-c requires a line to execute")
        );

        let cli = parse_args(&args(&["-c", "1"]));
        assert!(cli.usage_error.is_none());
    }
}
