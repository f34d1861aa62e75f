//! Command type for describing external invocations

use async_process::Command as AsyncCommand;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A description of an external command to run.
///
/// Unlike `async_process::Command`, this type is `Clone`, so a command can be
/// built once and handed to a [`Runner`](crate::Runner) several times. The
/// chaining methods consume and return the command.
#[derive(Debug, Clone)]
pub struct Command {
    /// The program to execute
    program: OsString,
    /// The arguments to pass to the program
    args: Vec<OsString>,
    /// Environment variables to set
    env: HashMap<OsString, OsString>,
    /// Working directory for the command
    current_dir: Option<PathBuf>,
}

impl Command {
    /// Create a new command for the given program
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
            env: HashMap::new(),
            current_dir: None,
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Append multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_owned());
        }
        self
    }

    /// Set an environment variable for the child
    pub fn env(mut self, key: impl AsRef<OsStr>, val: impl AsRef<OsStr>) -> Self {
        self.env
            .insert(key.as_ref().to_owned(), val.as_ref().to_owned());
        self
    }

    /// Set the working directory for the child
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_owned());
        self
    }

    /// Get the program name
    pub fn get_program(&self) -> &OsStr {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the working directory
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Render the invocation as a single shell-like line.
    ///
    /// Used in log output and error messages; not suitable for re-parsing.
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Prepare this command for execution by converting to an `async_process::Command`
    pub fn prepare(&self) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.program);
        cmd.args(&self.args);
        for (key, val) in &self.env {
            cmd.env(key, val);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}
