//! Deployment strategy selection

use std::fmt;

use crate::{Error, Result};

/// The two supervision mechanisms this tool can install.
///
/// Selected exactly once per invocation and immutable afterwards; a single
/// run never installs both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStrategy {
    /// Virtualenv plus a systemd service unit
    Host,
    /// Docker compose stack
    Container,
}

impl DeployStrategy {
    /// Map the operator's menu choice onto a strategy.
    ///
    /// Accepts exactly `"1"` and `"2"` (surrounding whitespace ignored).
    /// There is no default and no retry loop: anything else aborts the run
    /// before any deployment step executes.
    pub fn from_choice(input: &str) -> Result<Self> {
        match input.trim() {
            "1" => Ok(Self::Host),
            "2" => Ok(Self::Container),
            other => Err(Error::InvalidChoice {
                input: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeployStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host service (venv + systemd)"),
            Self::Container => write!(f, "containers (docker compose)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_choice() {
        assert_eq!(DeployStrategy::from_choice("1").unwrap(), DeployStrategy::Host);
    }

    #[test]
    fn test_container_choice() {
        assert_eq!(DeployStrategy::from_choice("2").unwrap(), DeployStrategy::Container);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(DeployStrategy::from_choice(" 1\n").unwrap(), DeployStrategy::Host);
    }

    #[test]
    fn test_everything_else_is_rejected() {
        for input in ["3", "", "12", "host", "1 2"] {
            let err = DeployStrategy::from_choice(input).unwrap_err();
            assert!(matches!(err, Error::InvalidChoice { .. }), "{input:?} was accepted");
        }
    }

    #[test]
    fn test_rejected_input_is_reported() {
        let err = DeployStrategy::from_choice("3\n").unwrap_err();
        match err {
            Error::InvalidChoice { input } => assert_eq!(input, "3"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
