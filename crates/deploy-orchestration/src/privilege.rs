//! Elevation check for the interactive entry point

use crate::{Error, Result};

/// Fail unless the process runs with root privileges.
///
/// Both strategies write under `/etc` and drive the system service
/// manager; there is no useful degraded mode without elevation.
pub fn require_root() -> Result<()> {
    if nix::unistd::geteuid().is_root() {
        Ok(())
    } else {
        Err(Error::Privilege)
    }
}
