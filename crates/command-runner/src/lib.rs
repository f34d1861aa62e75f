//! External command execution behind a swappable capability trait.
//!
//! Every deployment step ends in a call to some privileged external program
//! (apt-get, systemctl, docker). This crate wraps those calls: [`Command`]
//! describes an invocation, [`Runner`] is the capability that executes it,
//! and [`LocalRunner`] is the production implementation. Tests substitute
//! their own `Runner` to record invocations instead of touching the host.

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod local;
pub mod runner;

pub use command::Command;
pub use error::{Error, Result};
pub use local::LocalRunner;
pub use runner::{Capture, ExitStatus, Runner};
