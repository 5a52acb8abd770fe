//! GitHub Actions workflow commands.
//!
//! The runner scans step output for lines of the form `::command::message`.
//! An `error` command marks the step's annotation as failed; the step itself
//! fails through the process exit code.

#[cfg(test)]
#[path = "workflow_commands_tests.rs"]
mod tests;

/// Escapes a message so it survives as a single workflow command line.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats an `error` workflow command.
pub fn error(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Formats a `notice` workflow command.
pub fn notice(message: &str) -> String {
    format!("::notice::{}", escape_data(message))
}
