//! The interactive deployment flow

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

use command_runner::LocalRunner;
use deploy_orchestration::{
    ContainerDeployment, DeployConfig, DeployStrategy, HostDeployment, REQUIRED_KEYS, SecretKey,
    SecretPrompter, ensure_env_file, report, require_root,
};

/// Drive one deployment from prompt to status report.
///
/// The choice is validated before anything is written, so an invalid
/// selection aborts with no side effects at all.
pub async fn run(config_path: &Path) -> Result<()> {
    require_root()?;

    let config = DeployConfig::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let choice = read_choice(&mut io::stdin().lock())?;
    let strategy = DeployStrategy::from_choice(&choice)?;

    let env_file = config.env_file_path();
    if ensure_env_file(&env_file, REQUIRED_KEYS, &ConsolePrompter)? {
        println!("Wrote {}", env_file.display());
    } else {
        println!("Using existing {}", env_file.display());
    }

    println!("Deploying as {strategy}...");
    let runner = LocalRunner::new();
    match strategy {
        DeployStrategy::Host => HostDeployment::new(&runner, &config).deploy().await?,
        DeployStrategy::Container => ContainerDeployment::new(&runner, &config).deploy().await?,
    }

    print!("{}", report::next_steps(strategy, &config));
    Ok(())
}

/// Show the two-entry menu and read one line.
fn read_choice(input: &mut impl BufRead) -> Result<String> {
    println!("Select deployment method:");
    println!("  1) host service (venv + systemd)");
    println!("  2) containers (docker compose)");
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Prompter that asks on the operator's terminal.
struct ConsolePrompter;

impl SecretPrompter for ConsolePrompter {
    fn prompt(&self, key: &SecretKey) -> io::Result<String> {
        if key.concealed {
            dialoguer::Password::new()
                .with_prompt(format!("Enter {}", key.name))
                .allow_empty_password(true)
                .interact()
                .map_err(prompt_error)
        } else {
            let prompt = match key.default {
                Some(default) => format!("Enter {} [{}]", key.name, default),
                None => format!("Enter {}", key.name),
            };
            dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)
        }
    }
}

fn prompt_error(err: dialoguer::Error) -> io::Error {
    io::Error::other(err.to_string())
}
