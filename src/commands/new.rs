//! The `new` command: sets up a new directory using a template.

use crate::cli::{ArgDef, OptionDef};
use crate::commands::{Command, Invocation, GIT_DISABLED};
use crate::config::get_config;
use crate::error::Result;
use crate::ignore::ignore_set;
use crate::prompt::{DialoguerPrompter, Prompter};
use crate::scaffold::{find_template, materialize, preview_tree, render_tree};
use crate::template::Expander;
use colored::Colorize;

const FORCE: &str = "force";

pub fn command() -> Command {
    Command {
        name: "new",
        description: "Sets up a new directory using a template.",
        args: &[
            ArgDef { name: "template", is_optional: false },
            ArgDef { name: "dirname", is_optional: false },
        ],
        options: &[OptionDef {
            key: FORCE,
            long: &["force"],
            short: &['f'],
            has_value: false,
            default: None,
            description: "Force run without preview.",
        }],
        exec,
    }
}

fn exec(invocation: &Invocation) -> Result<()> {
    let template = invocation.args.required("template")?;
    let dirname = invocation.args.required("dirname")?;
    let git_disabled = invocation.options.is_enabled(GIT_DISABLED);

    let target_root = std::path::absolute(dirname)?;
    let config = get_config()?;
    let template_root = find_template(template, &config, git_disabled)?;
    let ignored = ignore_set()?;
    let prompter = DialoguerPrompter::new();

    // Preview / dry run.
    if !invocation.options.is_enabled(FORCE) {
        println!("{}", "Result Preview:".underline());
        println!();

        let tree = preview_tree(&template_root, &target_root)?;
        print!("{}", render_tree(&tree, &ignored));

        println!();
        if !prompter.confirm("Do you wish to continue?")? {
            return Ok(());
        }
    }

    let expander = Expander::new(&prompter);
    materialize(&template_root, &target_root, expander, &ignored)?;

    println!();
    println!("{}", "Finished!".green());
    Ok(())
}
