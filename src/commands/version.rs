//! The `version` command: prints the CLI version.

use crate::commands::{Command, Invocation};
use crate::error::Result;
use colored::Colorize;

pub fn command() -> Command {
    Command {
        name: "version",
        description: "Prints the CLI version.",
        args: &[],
        options: &[],
        exec,
    }
}

fn exec(_invocation: &Invocation) -> Result<()> {
    println!("Stencil version: {}", env!("CARGO_PKG_VERSION").bold());
    Ok(())
}
