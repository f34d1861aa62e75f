//! Environment verification
//!
//! Probes for the external tools a strategy is about to use and installs
//! the missing ones through the platform package manager.

use command_runner::{Command, Runner};
use tracing::{info, warn};

use crate::{Error, Result};

/// Whether a dependency was already on the host or had to be installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    /// The probe succeeded without any install action
    Present,
    /// The package manager installed it during this run
    Installed,
}

/// A dependency required by a deployment strategy
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Name used in messages and errors
    pub name: &'static str,
    /// Package installed when the probe fails
    pub package: &'static str,
    /// Exit 0 means the dependency is usable
    probe: Command,
}

impl Dependency {
    /// A dependency probed by looking the executable up on the search path
    pub fn executable(tool: &'static str, package: &'static str) -> Self {
        Self {
            name: tool,
            package,
            probe: Command::new("which").arg(tool),
        }
    }

    /// A dependency probed by asking python3 for one of its modules
    pub fn python_module(module: &'static str, package: &'static str) -> Self {
        Self {
            name: module,
            package,
            probe: Command::new("python3").args(["-m", module, "--help"]),
        }
    }
}

/// Verifies and installs the tools a strategy shells out to
pub struct Preflight<'r> {
    runner: &'r dyn Runner,
    index_refreshed: bool,
}

impl<'r> Preflight<'r> {
    /// Create a verifier over the given runner
    pub fn new(runner: &'r dyn Runner) -> Self {
        Self {
            runner,
            index_refreshed: false,
        }
    }

    /// Check whether a dependency's probe answers.
    ///
    /// A probe whose own binary cannot be spawned counts as absent: the
    /// probe failing to start is exactly the situation it exists to detect.
    pub async fn is_present(&self, dep: &Dependency) -> Result<bool> {
        match self.runner.capture(&dep.probe).await {
            Ok(capture) => Ok(capture.status.success()),
            Err(command_runner::Error::CommandNotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Ensure a dependency is available, installing it when the probe fails.
    ///
    /// One install attempt only. A second attempt would hit the same broken
    /// sources or unreachable network, so a still-failing probe aborts the
    /// run instead.
    pub async fn ensure(&mut self, dep: &Dependency) -> Result<ToolStatus> {
        if self.is_present(dep).await? {
            info!("{} already available", dep.name);
            return Ok(ToolStatus::Present);
        }

        info!("{} missing, installing package {}", dep.name, dep.package);
        if !self.index_refreshed {
            let update = Command::new("apt-get").arg("update");
            if !self.runner.run(&update).await?.success() {
                warn!("apt-get update failed, installing with the cached index");
            }
            self.index_refreshed = true;
        }

        let install = Command::new("apt-get").args(["install", "-y", dep.package]);
        if !self.runner.run(&install).await?.success() {
            return Err(Error::DependencyInstall {
                tool: dep.name.to_string(),
            });
        }

        if self.is_present(dep).await? {
            info!("installed {}", dep.package);
            Ok(ToolStatus::Installed)
        } else {
            Err(Error::DependencyInstall {
                tool: dep.name.to_string(),
            })
        }
    }
}
