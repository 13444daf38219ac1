//! The `list` command: lists available templates.

use crate::commands::{Command, Invocation, GIT_DISABLED};
use crate::config::get_config;
use crate::error::Result;
use crate::repository::list_known_templates;
use colored::Colorize;
use std::path::MAIN_SEPARATOR;

pub fn command() -> Command {
    Command {
        name: "list",
        description: "Lists available templates.",
        args: &[],
        options: &[],
        exec,
    }
}

fn exec(invocation: &Invocation) -> Result<()> {
    let config = get_config()?;
    let templates =
        list_known_templates(&config, invocation.options.is_enabled(GIT_DISABLED))?;

    let mut count = 0;
    for template in &templates {
        count += 1;
        if count == 1 {
            println!("{}", "Available Templates".underline());
        }

        let name = template
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = template
            .parent()
            .map(|parent| parent.display().to_string())
            .unwrap_or_default();
        println!("∙ {}{}", format!("{}{}", parent, MAIN_SEPARATOR).dimmed(), name.bold());
    }

    println!();
    println!("{} total", count.to_string().bold());
    Ok(())
}
