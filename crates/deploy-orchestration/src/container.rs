//! Container deployment strategy
//!
//! Makes sure the container engine is installed and running, then brings
//! the multi-container stack up from the compose descriptor. The up is
//! declarative: re-running reconciles the stack against the descriptor, so
//! this strategy never diffs engine state itself.

use std::fs;
use std::path::PathBuf;

use command_runner::{Command, Runner};
use tracing::info;

use crate::config::DeployConfig;
use crate::preflight::{Dependency, Preflight, ToolStatus};
use crate::{Error, Result};

/// Which compose flavor answers on this host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeFlavor {
    /// The standalone `docker-compose` binary
    Standalone,
    /// The `docker compose` CLI plugin
    Plugin,
}

/// The compose descriptor and how to address it on the command line
#[derive(Debug, Clone)]
pub struct ContainerStack {
    /// Path to the compose descriptor
    pub compose_file: PathBuf,
    /// Directory compose commands run from
    pub project_dir: PathBuf,
    /// Compose project name
    pub project_name: String,
}

impl ContainerStack {
    /// Base compose invocation for the detected flavor
    pub fn command(&self, flavor: ComposeFlavor) -> Command {
        let cmd = match flavor {
            ComposeFlavor::Standalone => Command::new("docker-compose"),
            ComposeFlavor::Plugin => Command::new("docker").arg("compose"),
        };
        cmd.arg("-f")
            .arg(&self.compose_file)
            .args(["-p", &self.project_name])
            .current_dir(&self.project_dir)
    }
}

/// Brings the backend up as a compose-managed container stack
pub struct ContainerDeployment<'a> {
    runner: &'a dyn Runner,
    config: &'a DeployConfig,
}

impl<'a> ContainerDeployment<'a> {
    /// Create the strategy over a runner and configuration
    pub fn new(runner: &'a dyn Runner, config: &'a DeployConfig) -> Self {
        Self { runner, config }
    }

    /// Install the engine if needed, then build and start the stack detached
    pub async fn deploy(&self) -> Result<()> {
        let mut preflight = Preflight::new(self.runner);

        let engine = Dependency::executable("docker", "docker.io");
        if preflight.ensure(&engine).await? == ToolStatus::Installed {
            // A freshly installed engine is neither enabled nor running yet.
            self.systemctl(&["enable", "--now", "docker"]).await?;
        }

        let flavor = self.ensure_compose(&mut preflight).await?;
        let stack = self.stack()?;

        info!("bringing up compose stack '{}'", stack.project_name);
        let up = stack.command(flavor).args(["up", "-d", "--build"]);
        let status = self.runner.run(&up).await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ContainerEngine {
                code: status.code.unwrap_or(-1),
            })
        }
    }

    /// Detect the available compose flavor.
    ///
    /// The standalone binary wins when both are present; when neither
    /// answers the standalone package is installed.
    async fn ensure_compose(&self, preflight: &mut Preflight<'_>) -> Result<ComposeFlavor> {
        let standalone = Dependency::executable("docker-compose", "docker-compose");
        if preflight.is_present(&standalone).await? {
            return Ok(ComposeFlavor::Standalone);
        }

        let plugin_probe = Command::new("docker").args(["compose", "version"]);
        if matches!(self.runner.capture(&plugin_probe).await, Ok(c) if c.status.success()) {
            return Ok(ComposeFlavor::Plugin);
        }

        preflight.ensure(&standalone).await?;
        Ok(ComposeFlavor::Standalone)
    }

    fn stack(&self) -> Result<ContainerStack> {
        let project_dir = fs::canonicalize(&self.config.app_dir)?;
        let compose_file = if self.config.compose_file.is_absolute() {
            self.config.compose_file.clone()
        } else {
            project_dir.join(&self.config.compose_file)
        };
        Ok(ContainerStack {
            compose_file,
            project_dir,
            project_name: self.config.service_name.clone(),
        })
    }

    async fn systemctl(&self, args: &[&str]) -> Result<()> {
        let cmd = Command::new("systemctl").args(args);
        let status = self.runner.run(&cmd).await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ServiceManager {
                action: format!("systemctl {}", args.join(" ")),
                code: status.code.unwrap_or(-1),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> ContainerStack {
        ContainerStack {
            compose_file: PathBuf::from("/opt/dietbot/docker-compose.yml"),
            project_dir: PathBuf::from("/opt/dietbot"),
            project_name: "dietbot".to_string(),
        }
    }

    #[test]
    fn test_standalone_command_line() {
        let cmd = stack().command(ComposeFlavor::Standalone);
        assert_eq!(
            cmd.display(),
            "docker-compose -f /opt/dietbot/docker-compose.yml -p dietbot"
        );
    }

    #[test]
    fn test_plugin_command_line() {
        let cmd = stack().command(ComposeFlavor::Plugin);
        assert_eq!(
            cmd.display(),
            "docker compose -f /opt/dietbot/docker-compose.yml -p dietbot"
        );
    }

    #[test]
    fn test_command_runs_from_the_project_dir() {
        let cmd = stack().command(ComposeFlavor::Standalone);
        assert_eq!(cmd.get_current_dir(), Some(std::path::Path::new("/opt/dietbot")));
    }
}
