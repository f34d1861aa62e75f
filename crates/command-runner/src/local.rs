//! Local process execution backend

use async_process::Stdio;
use async_trait::async_trait;
use tracing::debug;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::runner::{Capture, ExitStatus, Runner};

/// Runner that spawns commands as local child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRunner;

impl LocalRunner {
    /// Create a new local runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Runner for LocalRunner {
    async fn run(&self, command: &Command) -> Result<ExitStatus> {
        debug!("running: {}", command.display());

        let mut child = command
            .prepare()
            .spawn()
            .map_err(|e| spawn_error(command, e))?;

        let status = child.status().await?;
        Ok(convert_status(status))
    }

    async fn capture(&self, command: &Command) -> Result<Capture> {
        debug!("probing: {}", command.display());

        let mut cmd = command.prepare();
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| spawn_error(command, e))?;

        Ok(Capture {
            status: convert_status(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn convert_status(status: std::process::ExitStatus) -> ExitStatus {
    ExitStatus {
        code: status.code(),
        #[cfg(unix)]
        signal: {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        },
    }
}

fn spawn_error(command: &Command, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::CommandNotFound {
            command: command.get_program().to_string_lossy().into_owned(),
        }
    } else {
        Error::spawn_failed(format!("{}: {}", command.display(), err))
    }
}
