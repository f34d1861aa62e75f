//! Host deployment strategy
//!
//! Builds an isolated virtualenv, installs the dependency manifest into it,
//! and hands the backend to systemd as a restart-on-failure unit.

use std::fs;
use std::path::Path;

use command_runner::{Command, Runner};
use tracing::info;

use crate::config::DeployConfig;
use crate::preflight::{Dependency, Preflight};
use crate::service::ServiceDescriptor;
use crate::{Error, Result};

/// Installs the backend as a host service supervised by systemd
pub struct HostDeployment<'a> {
    runner: &'a dyn Runner,
    config: &'a DeployConfig,
}

impl<'a> HostDeployment<'a> {
    /// Create the strategy over a runner and configuration
    pub fn new(runner: &'a dyn Runner, config: &'a DeployConfig) -> Self {
        Self { runner, config }
    }

    /// Tools this strategy shells out to
    fn dependencies() -> [Dependency; 3] {
        [
            Dependency::executable("python3", "python3"),
            Dependency::executable("pip3", "python3-pip"),
            Dependency::python_module("venv", "python3-venv"),
        ]
    }

    /// Run every host-deployment step in order.
    ///
    /// Each step is a hard dependency on the previous one succeeding. On
    /// failure the partially provisioned environment stays in place for
    /// the operator to inspect; nothing is rolled back.
    pub async fn deploy(&self) -> Result<()> {
        let mut preflight = Preflight::new(self.runner);
        for dep in Self::dependencies() {
            preflight.ensure(&dep).await?;
        }

        let app_dir = fs::canonicalize(&self.config.app_dir)?;

        self.create_venv(&app_dir).await?;
        self.install_requirements(&app_dir).await?;

        let descriptor = self.descriptor(&app_dir);
        self.install_unit(&descriptor)?;

        self.systemctl(&["daemon-reload"]).await?;
        self.systemctl(&["enable", &self.config.service_name]).await?;
        self.systemctl(&["start", &self.config.service_name]).await?;

        info!("{} installed, enabled and started", descriptor.file_name());
        Ok(())
    }

    async fn create_venv(&self, app_dir: &Path) -> Result<()> {
        let cmd = Command::new("python3")
            .args(["-m", "venv"])
            .arg(&self.config.venv_dir)
            .current_dir(app_dir);
        self.checked(cmd, "virtualenv creation").await
    }

    async fn install_requirements(&self, app_dir: &Path) -> Result<()> {
        let pip = app_dir.join(&self.config.venv_dir).join("bin").join("pip");
        let cmd = Command::new(pip)
            .args(["install", "-r"])
            .arg(&self.config.requirements)
            .current_dir(app_dir);
        self.checked(cmd, "requirements install").await
    }

    /// The unit handed to systemd, with every path made absolute
    fn descriptor(&self, app_dir: &Path) -> ServiceDescriptor {
        let exec_start = if self.config.start_command.starts_with('/') {
            self.config.start_command.clone()
        } else {
            format!("{}/{}", app_dir.display(), self.config.start_command)
        };
        let env_file = if self.config.env_file.is_absolute() {
            self.config.env_file.clone()
        } else {
            app_dir.join(&self.config.env_file)
        };

        ServiceDescriptor {
            unit_name: self.config.service_name.clone(),
            description: format!("{} backend service", self.config.service_name),
            working_dir: app_dir.to_path_buf(),
            exec_start,
            env_file,
        }
    }

    fn install_unit(&self, descriptor: &ServiceDescriptor) -> Result<()> {
        let path = self.config.unit_dir.join(descriptor.file_name());
        info!("installing unit {}", path.display());
        fs::write(&path, descriptor.render()).map_err(|e| Error::FileWrite { path, source: e })
    }

    async fn checked(&self, cmd: Command, step: &str) -> Result<()> {
        let status = self.runner.run(&cmd).await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::StepFailed {
                step: step.to_string(),
                code: status.code.unwrap_or(-1),
            })
        }
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
