//! Diagnostic-tool invocation with a whitelist and timeout enforcement.
//!
//! Live attribute reads shell out to vendor tools with fixed argument
//! vectors. The runner is constructed with the full set of tools a binding
//! may invoke; the tool path is injected through the binding's
//! configuration rather than a mutable global, so tests can point it at a
//! stub executable.

use std::collections::HashSet;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Runs whitelisted diagnostic commands and captures their output.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    default_timeout: Duration,
    allowed_commands: HashSet<String>,
}

impl CommandRunner {
    /// Create a runner with an empty whitelist - must be configured before use
    pub fn new() -> Self {
        Self {
            default_timeout: Duration::from_secs(5),
            allowed_commands: HashSet::new(),
        }
    }

    /// Create a runner with a custom timeout and empty whitelist
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            default_timeout: timeout,
            allowed_commands: HashSet::new(),
        }
    }

    /// Add a program to the whitelist
    pub fn allow_command(&mut self, command: impl Into<String>) {
        self.allowed_commands.insert(command.into());
    }

    /// Check if a program is whitelisted
    pub fn is_allowed(&self, command: &str) -> bool {
        self.allowed_commands.contains(command)
    }

    /// Invoke a program synchronously and return its standard output.
    ///
    /// The child runs with a cleared environment and restricted PATH, is
    /// killed if it overruns the timeout, and must exit zero for the
    /// output to be considered usable.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        if !self.allowed_commands.contains(program) {
            return Err(CommandError::NotWhitelisted {
                program: program.to_string(),
            });
        }

        log::debug!("invoking '{}' {:?}", program, args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .env_clear()
            .env("PATH", "/usr/bin:/bin:/usr/sbin:/sbin")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CommandError::ProgramNotFound {
                    program: program.to_string(),
                }
            } else if e.kind() == std::io::ErrorKind::PermissionDenied {
                CommandError::PermissionDenied {
                    program: program.to_string(),
                }
            } else {
                CommandError::ExecutionFailed {
                    program: program.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = wait_timeout::ChildExt::wait_timeout(&mut child, self.default_timeout)
            .map_err(|e| CommandError::ExecutionFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        match status {
            Some(status) => {
                let output =
                    child
                        .wait_with_output()
                        .map_err(|e| CommandError::ExecutionFailed {
                            program: program.to_string(),
                            reason: e.to_string(),
                        })?;

                if !status.success() {
                    return Err(CommandError::NonZeroExit {
                        program: program.to_string(),
                        code: status.code().unwrap_or(-1),
                        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                    });
                }

                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            None => {
                let _ = child.kill();
                Err(CommandError::Timeout {
                    program: program.to_string(),
                    timeout_ms: self.default_timeout.as_millis() as u64,
                })
            }
        }
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Command invocation errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Program not found: {program}")]
    ProgramNotFound { program: String },

    #[error("Execution failed for '{program}': {reason}")]
    ExecutionFailed { program: String, reason: String },

    #[error("Command '{program}' timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("Permission denied: {program}")]
    PermissionDenied { program: String },

    #[error("Command '{program}' not in whitelist")]
    NotWhitelisted { program: String },

    #[error("Command '{program}' exited with status {code}: {stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_whitelist_refuses_everything() {
        let runner = CommandRunner::new();
        assert!(!runner.is_allowed("wl"));

        match runner.run("wl", &["counters"]) {
            Err(CommandError::NotWhitelisted { program }) => assert_eq!(program, "wl"),
            other => panic!("expected NotWhitelisted, got {other:?}"),
        }
    }

    #[test]
    fn test_whitelist_management() {
        let mut runner = CommandRunner::new();
        runner.allow_command("wl");
        assert!(runner.is_allowed("wl"));
        assert!(!runner.is_allowed("mocactl"));
    }

    #[test]
    fn test_missing_program_maps_to_program_not_found() {
        let mut runner = CommandRunner::new();
        runner.allow_command("/nonexistent/diagnostic-tool");

        match runner.run("/nonexistent/diagnostic-tool", &[]) {
            Err(CommandError::ProgramNotFound { .. }) => {}
            other => panic!("expected ProgramNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_captures_stdout_of_successful_command() {
        let mut runner = CommandRunner::new();
        runner.allow_command("echo");

        let out = runner.run("echo", &["current mac channel 11"]).unwrap();
        assert_eq!(out.trim(), "current mac channel 11");
    }

    #[test]
    fn test_nonzero_exit_is_an_error() {
        let mut runner = CommandRunner::new();
        runner.allow_command("false");

        match runner.run("false", &[]) {
            Err(CommandError::NonZeroExit { code, .. }) => assert_ne!(code, 0),
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }
}
