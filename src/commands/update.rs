//! The `update` command: pulls every configured template repository.

use crate::commands::{Command, Invocation};
use crate::config::get_config;
use crate::error::Result;
use crate::repository::{repo_version, sync_with_remote};
use colored::Colorize;

pub fn command() -> Command {
    Command {
        name: "update",
        description: "Updates the configured template repositories.",
        args: &[],
        options: &[],
        exec,
    }
}

fn exec(_invocation: &Invocation) -> Result<()> {
    let config = get_config()?;
    if config.repositories.is_empty() {
        println!("No repositories configured.");
        return Ok(());
    }

    for repository in &config.repositories {
        let before = repo_version(repository);
        sync_with_remote(repository);
        let after = repo_version(repository);

        if before == after {
            println!("'{}' is already up to date.", repository.path);
        } else {
            let line = format!(
                "Updated '{}' from {} to {}.",
                repository.path,
                display(&before),
                display(&after).bold()
            );
            println!("{}", line.green());
        }
    }

    Ok(())
}

fn display(version: &Option<String>) -> &str {
    version.as_deref().unwrap_or("unknown")
}
