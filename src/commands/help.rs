//! The `help` command: prints usage, commands and options.
//! Also the fallback when no command or an unknown one is named.

use crate::commands::{all, merged_options, Command, Invocation};
use crate::error::Result;
use colored::Colorize;

pub fn command() -> Command {
    Command { name: "help", description: "Show help.", args: &[], options: &[], exec }
}

fn exec(_invocation: &Invocation) -> Result<()> {
    println!("{}", "General Usage:".underline());
    println!("{}", "stencil [<options>] <command> [<args>]".bold());
    println!();

    println!("{}", "Commands:".underline());
    for command in all() {
        let mut args = String::new();
        for arg in command.args {
            if arg.is_optional {
                args.push_str(&format!(" [{}]", arg.name));
            } else {
                args.push_str(&format!(" <{}>", arg.name));
            }
        }

        println!("∙ {}", format!("stencil [<options>] {}{}", command.name, args).bold());
        println!("  {}\n", command.description);
    }

    println!("{}", "Options:".underline());
    for option in merged_options() {
        let mut aliases = String::new();
        for alias in option.short {
            if !aliases.is_empty() {
                aliases.push_str(", ");
            }
            aliases.push_str(&format!("-{}", alias));
        }
        for alias in option.long {
            if !aliases.is_empty() {
                aliases.push_str(", ");
            }
            aliases.push_str(&format!("--{}", alias));
        }

        println!("∙ {}", aliases.bold());
        println!("  {}\n", option.description);
    }

    Ok(())
}
