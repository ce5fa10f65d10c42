use infixcalc::{Reply, Shell, ShellError};

/// Whether the session keeps reading input after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Execute a single line, printing its reply when asked to
pub(crate) fn execute_line(shell: &mut Shell, input: &str, print_output: bool) -> Result<Flow, ShellError> {
    let reply = shell.execute(input)?;

    if print_output && reply != Reply::Silent {
        println!("{}", reply);
    }

    Ok(if reply == Reply::Exit { Flow::Exit } else { Flow::Continue })
}

/// Execute a line in an interactive session: errors are printed as one line
/// of output and the session goes on
pub(crate) fn run_line(shell: &mut Shell, input: &str) -> Flow {
    match execute_line(shell, input, true) {
        Ok(flow) => flow,
        Err(e) => {
            println!("{}", e);
            Flow::Continue
        }
    }
}
