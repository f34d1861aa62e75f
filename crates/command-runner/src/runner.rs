//! Runner capability trait and its result types

use async_trait::async_trait;

use crate::command::Command;
use crate::error::Result;

/// Exit status of a finished command
#[derive(Debug, Clone)]
pub struct ExitStatus {
    /// Exit code if the process exited normally
    pub code: Option<i32>,
    /// Signal that terminated the process (Unix only)
    #[cfg(unix)]
    pub signal: Option<i32>,
}

impl ExitStatus {
    /// Returns true if the process exited successfully (code 0)
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct Capture {
    /// Exit status of the command
    pub status: ExitStatus,
    /// Everything the command wrote to stdout
    pub stdout: String,
    /// Everything the command wrote to stderr
    pub stderr: String,
}

/// A capability for executing external commands.
///
/// Deployment code holds a `&dyn Runner` and never spawns processes
/// directly. [`LocalRunner`](crate::LocalRunner) is the production
/// implementation; tests substitute scripted runners that record the
/// invocations they receive.
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run a command with inherited stdio and wait for it to finish.
    ///
    /// The child shares the operator's terminal, so package-manager and
    /// compose output stays visible while the step runs.
    async fn run(&self, command: &Command) -> Result<ExitStatus>;

    /// Run a command silently and capture its output.
    ///
    /// Used for probes (`which`, version checks) whose output is data,
    /// not operator feedback.
    async fn capture(&self, command: &Command) -> Result<Capture>;
}
