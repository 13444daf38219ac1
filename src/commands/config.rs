//! The `config` command: prints the path of the configuration file.

use crate::commands::{Command, Invocation};
use crate::config::config_path;
use crate::error::Result;

pub fn command() -> Command {
    Command {
        name: "config",
        description: "Prints the absolute path to the current stencil config file.",
        args: &[],
        options: &[],
        exec,
    }
}

fn exec(_invocation: &Invocation) -> Result<()> {
    println!("{}", config_path().display());
    Ok(())
}
