//! Service unit descriptor for host deployments

use std::path::PathBuf;

/// Identity of the long-running process handed to the service manager.
///
/// The descriptor owns every field the unit needs; its rendered form is
/// what lands, unchanged, in the manager's unit directory.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Unit name, without the `.service` suffix
    pub unit_name: String,
    /// Human-readable unit description
    pub description: String,
    /// Absolute working directory of the service
    pub working_dir: PathBuf,
    /// Absolute command line that starts the service
    pub exec_start: String,
    /// Absolute path of the environment file loaded into the unit
    pub env_file: PathBuf,
}

impl ServiceDescriptor {
    /// File name of the installed unit
    pub fn file_name(&self) -> String {
        format!("{}.service", self.unit_name)
    }

    /// Render the descriptor as a systemd unit.
    ///
    /// Restart-on-failure and start-on-boot are part of the contract with
    /// the service manager, not configuration.
    pub fn render(&self) -> String {
        format!(
            "[Unit]\n\
             Description={}\n\
             After=network.target\n\
             \n\
             [Service]\n\
             WorkingDirectory={}\n\
             EnvironmentFile={}\n\
             ExecStart={}\n\
             Restart=on-failure\n\
             \n\
             [Install]\n\
             WantedBy=multi-user.target\n",
            self.description,
            self.working_dir.display(),
            self.env_file.display(),
            self.exec_start,
        )
    }
}
