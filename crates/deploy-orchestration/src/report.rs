//! Post-deployment status reporting
//!
//! Pure formatting: the caller prints the result. Nothing here runs a
//! command or touches a file.

use crate::config::DeployConfig;
use crate::strategy::DeployStrategy;

/// The verification commands matching the strategy that just ran
pub fn next_steps(strategy: DeployStrategy, config: &DeployConfig) -> String {
    let name = &config.service_name;
    match strategy {
        DeployStrategy::Host => format!(
            "Deployment complete.\n\
             Check the service:  systemctl status {name}\n\
             Follow the logs:    journalctl -fu {name}\n"
        ),
        DeployStrategy::Container => format!(
            "Deployment complete.\n\
             Check the stack:    docker compose -p {name} ps\n\
             Follow the logs:    docker compose -p {name} logs -f\n"
        ),
    }
}
