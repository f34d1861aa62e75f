//! Shared test doubles for deployment tests

#![allow(dead_code)]

use async_trait::async_trait;
use command_runner::{Capture, Command, ExitStatus, Runner};
use deploy_orchestration::{SecretKey, SecretPrompter};
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

/// Runner that never touches the host: it records every invocation and
/// answers with scripted exit codes (success unless told otherwise).
pub struct ScriptedRunner {
    calls: Mutex<Vec<String>>,
    scripted: Mutex<HashMap<String, Vec<i32>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            scripted: Mutex::new(HashMap::new()),
        }
    }

    /// Queue a non-zero exit code for the next invocation of `line`.
    /// Queued codes are consumed in order; later invocations succeed again.
    pub fn fail_once(&self, line: &str, code: i32) {
        self.scripted
            .lock()
            .unwrap()
            .entry(line.to_string())
            .or_default()
            .push(code);
    }

    /// Every command line seen so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many recorded lines start with `prefix`.
    pub fn count_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn respond(&self, command: &Command) -> ExitStatus {
        let line = command.display();
        let code = {
            let mut scripted = self.scripted.lock().unwrap();
            match scripted.get_mut(&line) {
                Some(queue) if !queue.is_empty() => queue.remove(0),
                _ => 0,
            }
        };
        self.calls.lock().unwrap().push(line);
        ExitStatus {
            code: Some(code),
            #[cfg(unix)]
            signal: None,
        }
    }
}

#[async_trait]
impl Runner for ScriptedRunner {
    async fn run(&self, command: &Command) -> command_runner::Result<ExitStatus> {
        Ok(self.respond(command))
    }

    async fn capture(&self, command: &Command) -> command_runner::Result<Capture> {
        Ok(Capture {
            status: self.respond(command),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Prompter answering from a fixed script
pub struct ScriptedPrompter {
    answers: Mutex<Vec<String>>,
    asked: Mutex<Vec<&'static str>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// The key names prompted for, in order.
    pub fn asked(&self) -> Vec<&'static str> {
        self.asked.lock().unwrap().clone()
    }
}

impl SecretPrompter for ScriptedPrompter {
    fn prompt(&self, key: &SecretKey) -> io::Result<String> {
        self.asked.lock().unwrap().push(key.name);
        Ok(self.answers.lock().unwrap().remove(0))
    }
}
