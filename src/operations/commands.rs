//! External command execution through the System abstraction

use crate::error::SetupError;
use crate::system::{CommandOutput, System};
use anyhow::{Context as _, Result};
use tracing::{debug, warn};

/// Run a command and fail unless it exits successfully
///
/// # Errors
///
/// Returns `SetupError::Command` if the program cannot be started or exits
/// with a nonzero status.
pub fn run_checked(system: &dyn System, program: &str, args: &[&str]) -> Result<CommandOutput> {
    let command_line = format_command(program, args);
    debug!("Executing: {}", command_line);

    let output = system
        .run(program, args)
        .with_context(|| SetupError::command(format!("Failed to execute: {command_line}")))?;

    if !output.success {
        let mut error_msg = format!(
            "'{}' failed with exit code {}",
            command_line,
            output.code.unwrap_or(-1)
        );
        if !output.stderr.trim().is_empty() {
            error_msg.push_str(&format!("\nError output:\n{}", output.stderr.trim()));
        }
        return Err(SetupError::command(error_msg).into());
    }

    if !output.stdout.trim().is_empty() {
        debug!("{}", output.stdout.trim());
    }
    Ok(output)
}

/// Run a command whose failure does not stop the setup
///
/// Failures are logged as warnings. Returns whether the command succeeded.
pub fn run_unchecked(system: &dyn System, program: &str, args: &[&str]) -> bool {
    match run_checked(system, program, args) {
        Ok(_) => true,
        Err(err) => {
            warn!("{:#}", err);
            false
        }
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut line = program.to_owned();
    for arg in args {
        line.push(' ');
        if arg.is_empty() {
            line.push_str("\"\"");
        } else {
            line.push_str(arg);
        }
    }
    line
}
