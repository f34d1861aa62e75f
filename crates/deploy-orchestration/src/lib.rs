//! # Deployment orchestration
//!
//! Control logic for installing the dietbot backend on a single host:
//! verify the tools the chosen strategy needs, make sure the secret file
//! exists, then bring the service under supervision through exactly one of
//! two mutually exclusive strategies — a systemd-managed virtualenv install
//! or a docker compose stack.
//!
//! The crate holds no long-lived state. Every run recomputes what it needs
//! and leaves behind only the environment file, the unit file, and whatever
//! the external engines persist themselves.

#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod config;
pub mod container;
pub mod host;
pub mod preflight;
pub mod privilege;
pub mod report;
pub mod secrets;
pub mod service;
pub mod strategy;

pub use config::DeployConfig;
pub use container::{ComposeFlavor, ContainerDeployment, ContainerStack};
pub use host::HostDeployment;
pub use preflight::{Dependency, Preflight, ToolStatus};
pub use privilege::require_root;
pub use secrets::{REQUIRED_KEYS, SecretKey, SecretPrompter, ensure_env_file};
pub use service::ServiceDescriptor;
pub use strategy::DeployStrategy;

use std::path::PathBuf;

/// Error types for deployment operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Not running with the required elevation
    #[error("this tool must run as root (try sudo)")]
    Privilege,

    /// A required tool is still unavailable after one install attempt
    #[error("dependency '{tool}' is unavailable after install; fix the package sources and re-run")]
    DependencyInstall {
        /// The tool that could not be made available
        tool: String,
    },

    /// Strategy selection input was not one of the two known choices
    #[error("unrecognized deployment choice '{input}': enter 1 (host service) or 2 (containers)")]
    InvalidChoice {
        /// The rejected input
        input: String,
    },

    /// A secret prompt produced no usable value
    #[error("no value provided for secret '{key}'")]
    MissingSecret {
        /// The key that was left empty
        key: String,
    },

    /// The environment or unit file could not be created
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        /// The file that could not be written
        path: PathBuf,
        /// The underlying I/O failure
        source: std::io::Error,
    },

    /// A provisioning step returned non-zero
    #[error("{step} failed with exit code {code}")]
    StepFailed {
        /// The step that failed
        step: String,
        /// Its exit code
        code: i32,
    },

    /// A service-manager call returned non-zero
    #[error("{action} failed with exit code {code}")]
    ServiceManager {
        /// The systemctl invocation that failed
        action: String,
        /// Its exit code
        code: i32,
    },

    /// The container engine returned non-zero
    #[error("container stack failed to come up (exit code {code})")]
    ContainerEngine {
        /// The compose exit code
        code: i32,
    },

    /// Configuration file errors
    #[error("invalid configuration in {}: {reason}", path.display())]
    Config {
        /// The configuration file
        path: PathBuf,
        /// What went wrong while parsing it
        reason: String,
    },

    /// Command execution errors
    #[error(transparent)]
    Runner(#[from] command_runner::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for deployment operations
pub type Result<T> = std::result::Result<T, Error>;
