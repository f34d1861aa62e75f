//! Deployment configuration
//!
//! Every field has a default matching the stock dietbot checkout, so the
//! `deploy.yaml` file is optional and usually absent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Tunable names and paths for a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Systemd unit name and compose project name
    pub service_name: String,

    /// Directory holding the backend checkout
    pub app_dir: PathBuf,

    /// Environment file, relative to `app_dir` unless absolute
    pub env_file: PathBuf,

    /// Dependency manifest installed into the virtualenv
    pub requirements: PathBuf,

    /// Virtualenv directory, relative to `app_dir` unless absolute
    pub venv_dir: PathBuf,

    /// Command line the service unit starts, relative to `app_dir`
    pub start_command: String,

    /// Directory the rendered unit file is installed into
    pub unit_dir: PathBuf,

    /// Compose descriptor, relative to `app_dir` unless absolute
    pub compose_file: PathBuf,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            service_name: "dietbot".to_string(),
            app_dir: PathBuf::from("."),
            env_file: PathBuf::from(".env"),
            requirements: PathBuf::from("requirements.txt"),
            venv_dir: PathBuf::from("venv"),
            start_command: "venv/bin/uvicorn main:app --host 0.0.0.0 --port 8000".to_string(),
            unit_dir: PathBuf::from("/etc/systemd/system"),
            compose_file: PathBuf::from("docker-compose.yml"),
        }
    }
}

impl DeployConfig {
    /// Load a configuration file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Resolve a configured path against the app directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.app_dir.join(path)
        }
    }

    /// Full path of the environment file
    pub fn env_file_path(&self) -> PathBuf {
        self.resolve(&self.env_file)
    }

    /// Full path of the compose descriptor
    pub fn compose_file_path(&self) -> PathBuf {
        self.resolve(&self.compose_file)
    }

    /// Full path of the installed unit file
    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.service", self.service_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeployConfig::default();
        assert_eq!(config.service_name, "dietbot");
        assert_eq!(config.unit_path(), Path::new("/etc/systemd/system/dietbot.service"));
        assert_eq!(config.env_file_path(), Path::new("./.env"));
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = "service_name: mealbot\napp_dir: /opt/mealbot\n";
        let config: DeployConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.service_name, "mealbot");
        assert_eq!(config.app_dir, Path::new("/opt/mealbot"));
        // Untouched fields keep their defaults
        assert_eq!(config.venv_dir, Path::new("venv"));
        assert_eq!(config.env_file_path(), Path::new("/opt/mealbot/.env"));
    }

    #[test]
    fn test_absolute_paths_are_not_rebased() {
        let config = DeployConfig {
            app_dir: PathBuf::from("/opt/dietbot"),
            env_file: PathBuf::from("/etc/dietbot/.env"),
            ..Default::default()
        };
        assert_eq!(config.env_file_path(), Path::new("/etc/dietbot/.env"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = DeployConfig::load(Path::new("/nonexistent/deploy.yaml")).unwrap();
        assert_eq!(config.service_name, "dietbot");
    }
}
