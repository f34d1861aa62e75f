//! Secret store writer
//!
//! Creates the service's environment file on first run. An existing file is
//! never rewritten: its absence is the only signal that secrets still need
//! to be collected, so re-running the tool cannot clobber stored values.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::{Error, Result};

/// A secret the supervised service reads from its environment file
#[derive(Debug, Clone, Copy)]
pub struct SecretKey {
    /// Variable name written to the file
    pub name: &'static str,
    /// Value substituted when the operator answers with an empty line
    pub default: Option<&'static str>,
    /// Whether prompts should conceal the operator's input
    pub concealed: bool,
}

/// The keys the dietbot backend requires, in the order they are written
pub const REQUIRED_KEYS: &[SecretKey] = &[
    SecretKey {
        name: "BOT_TOKEN",
        default: None,
        concealed: true,
    },
    SecretKey {
        name: "DATABASE_URL",
        default: Some("sqlite:///./test.db"),
        concealed: false,
    },
];

/// Capability for collecting one secret value from the operator.
///
/// The production implementation asks on the terminal; tests supply
/// scripted values instead.
pub trait SecretPrompter {
    /// Ask for the value of one key
    fn prompt(&self, key: &SecretKey) -> io::Result<String>;
}

/// Ensure the environment file exists, collecting values when it does not.
///
/// Returns `true` when the file was created. When the file already exists
/// this is a no-op: no prompt runs and the contents stay untouched. Each
/// key is asked exactly once, in the order given; an empty answer falls
/// back to the key's default and is rejected when there is none.
pub fn ensure_env_file(
    path: &Path,
    keys: &[SecretKey],
    prompter: &dyn SecretPrompter,
) -> Result<bool> {
    if path.exists() {
        info!("{} already present, leaving it untouched", path.display());
        return Ok(false);
    }

    let mut contents = String::new();
    for key in keys {
        let answer = prompter.prompt(key)?;
        let answer = answer.trim();
        let value = match (answer.is_empty(), key.default) {
            (false, _) => answer,
            (true, Some(default)) => default,
            (true, None) => {
                return Err(Error::MissingSecret {
                    key: key.name.to_string(),
                });
            }
        };
        contents.push_str(key.name);
        contents.push('=');
        contents.push_str(value);
        contents.push('\n');
    }

    write_private(path, &contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("wrote {}", path.display());
    Ok(true)
}

/// Write the file readable and writable by its owner only.
///
/// The values land on disk in plain text; the mode restriction is the one
/// hardening that leaves the file's line format unchanged.
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Scripted {
        answers: RefCell<Vec<String>>,
        asked: RefCell<Vec<&'static str>>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl SecretPrompter for Scripted {
        fn prompt(&self, key: &SecretKey) -> io::Result<String> {
            self.asked.borrow_mut().push(key.name);
            Ok(self.answers.borrow_mut().remove(0))
        }
    }

    #[test]
    fn test_creates_file_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let prompter = Scripted::new(&["abc123", "postgres://db/dietbot"]);

        let created = ensure_env_file(&path, REQUIRED_KEYS, &prompter).unwrap();

        assert!(created);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "BOT_TOKEN=abc123\nDATABASE_URL=postgres://db/dietbot\n"
        );
        assert_eq!(*prompter.asked.borrow(), vec!["BOT_TOKEN", "DATABASE_URL"]);
    }

    #[test]
    fn test_empty_answer_takes_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let prompter = Scripted::new(&["abc123", "\n"]);

        ensure_env_file(&path, REQUIRED_KEYS, &prompter).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("DATABASE_URL=sqlite:///./test.db\n"));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let prompter = Scripted::new(&["", "unused"]);

        let err = ensure_env_file(&path, REQUIRED_KEYS, &prompter).unwrap_err();

        assert!(matches!(err, Error::MissingSecret { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_file_is_left_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "BOT_TOKEN=original\n").unwrap();
        let prompter = Scripted::new(&[]);

        let created = ensure_env_file(&path, REQUIRED_KEYS, &prompter).unwrap();

        assert!(!created);
        assert!(prompter.asked.borrow().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "BOT_TOKEN=original\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let prompter = Scripted::new(&["abc123", ""]);

        ensure_env_file(&path, REQUIRED_KEYS, &prompter).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
