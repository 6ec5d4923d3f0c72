//! SafeCommandExecutor: Type-safe command execution with compile-time injection prevention
//!
//! # Security Features
//!
//! - **Whitelist-based validation**: Only pre-approved commands can execute
//! - **Injection prevention**: Uses `tokio::process::Command` which prevents shell injection
//! - **Argument sanitization**: Arguments passed as a slice, never interpolated into shell strings
//! - **Working directory validation**: Validates existence before execution
//! - **Timeout control**: Prevents long-running or hanging processes

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Allowed commands whitelist for security.
///
/// Only these commands can be executed via SafeCommandExecutor. Publishing
/// never needs anything beyond the git porcelain.
const ALLOWED_COMMANDS: &[&str] = &["git"];

/// Errors that can occur during command execution
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command is not in the allowed whitelist
    #[error("Command '{0}' is not in the allowed whitelist")]
    CommandNotAllowed(String),

    /// Working directory does not exist or is not accessible
    #[error("Working directory does not exist: {0}")]
    InvalidWorkingDirectory(PathBuf),

    /// Command execution failed (e.g., binary not found, permission denied)
    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    /// Command exited with a non-zero status
    #[error("Command 'git {command}' failed: {detail}")]
    CommandFailed { command: String, detail: String },

    /// Command exceeded the timeout duration
    #[error("Command timeout after {0:?}")]
    Timeout(Duration),
}

/// Safe command executor with security controls
#[derive(Debug, Clone)]
pub struct SafeCommandExecutor {
    /// Working directory where commands will be executed
    working_dir: PathBuf,
    /// Optional timeout for command execution
    timeout: Option<Duration>,
}

impl SafeCommandExecutor {
    /// Create a new SafeCommandExecutor with working directory validation.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidWorkingDirectory` if the directory does
    /// not exist.
    pub fn new<P: AsRef<Path>>(working_dir: P) -> Result<Self, CommandError> {
        let working_dir = working_dir.as_ref().to_path_buf();

        if !working_dir.exists() {
            return Err(CommandError::InvalidWorkingDirectory(working_dir));
        }

        Ok(Self {
            working_dir,
            timeout: None,
        })
    }

    /// Set command execution timeout.
    ///
    /// Commands exceeding this duration are aborted and reported as
    /// `CommandError::Timeout`.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// The directory commands run in
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Execute a command with whitelist validation and argument sanitization.
    ///
    /// Arguments are passed as a slice through `tokio::process::Command`,
    /// so nothing is ever interpreted by a shell.
    ///
    /// # Errors
    ///
    /// - `CommandError::CommandNotAllowed` - Command not in whitelist
    /// - `CommandError::ExecutionFailed` - Binary not found or execution error
    /// - `CommandError::Timeout` - Timeout elapsed before the command exited
    pub async fn execute(&self, command: &str, args: &[&str]) -> Result<Output, CommandError> {
        // Whitelist validation: Only pre-approved commands
        if !ALLOWED_COMMANDS.contains(&command) {
            return Err(CommandError::CommandNotAllowed(command.to_string()));
        }

        let mut cmd = Command::new(command);
        cmd.args(args).current_dir(&self.working_dir);
        let future = cmd.output();

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, future)
                .await
                .map_err(|_| CommandError::Timeout(timeout))?,
            None => future.await,
        }
        .map_err(|e| CommandError::ExecutionFailed(e.to_string()))?;

        Ok(output)
    }

    /// Execute a command and require a zero exit status.
    ///
    /// Returns trimmed stdout; a non-zero exit is mapped to
    /// `CommandError::CommandFailed` carrying trimmed stderr.
    pub async fn execute_checked(
        &self,
        command: &str,
        args: &[&str],
    ) -> Result<String, CommandError> {
        let output = self.execute(command, args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => format!("exit status {:?}", output.status.code()),
                s => s.to_string(),
            };
            return Err(CommandError::CommandFailed {
                command: args.join(" "),
                detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
