//! The command registry for the Stencil application.
//! Every command contributes its option definitions to one merged table
//! that is parsed up front; the first leftover positional then selects
//! the command to run.

pub mod config;
pub mod help;
pub mod list;
pub mod new;
pub mod update;
pub mod version;

use crate::cli::{ArgDef, ArgumentMap, OptionDef, ParsedOptions};
use crate::error::Result;

/// Option key for verbose logging.
pub const VERBOSE: &str = "verbose";
/// Option key for skipping git synchronization.
pub const GIT_DISABLED: &str = "git_disabled";

/// Options every command understands.
pub const SHARED_OPTIONS: [OptionDef; 2] = [
    OptionDef {
        key: VERBOSE,
        long: &["verbose"],
        short: &['v'],
        has_value: false,
        default: None,
        description: "Enable verbose logging output.",
    },
    OptionDef {
        key: GIT_DISABLED,
        long: &["no-git"],
        short: &['g'],
        has_value: false,
        default: None,
        description: "Disable Git operations (pull).",
    },
];

/// A single CLI command.
#[derive(Clone, Copy)]
pub struct Command {
    /// Name the command is invoked by.
    pub name: &'static str,
    /// One-line description shown by the help command.
    pub description: &'static str,
    /// Positional arguments the command accepts.
    pub args: &'static [ArgDef],
    /// Options specific to this command.
    pub options: &'static [OptionDef],
    /// The implementation.
    pub exec: fn(&Invocation) -> Result<()>,
}

/// Everything a command receives when it runs.
pub struct Invocation {
    /// The fully parsed option table.
    pub options: ParsedOptions,
    /// The command's positional arguments, mapped by name.
    pub args: ArgumentMap,
}

/// All commands, in the order the help output lists them.
pub fn all() -> [Command; 6] {
    [
        config::command(),
        list::command(),
        new::command(),
        update::command(),
        version::command(),
        help::command(),
    ]
}

/// The merged option table: shared options followed by every command's
/// own.
pub fn merged_options() -> Vec<OptionDef> {
    let mut options = SHARED_OPTIONS.to_vec();
    for command in all() {
        options.extend_from_slice(command.options);
    }
    options
}

/// Finds a command by name.
pub fn find(name: &str) -> Option<Command> {
    all().into_iter().find(|command| command.name == name)
}
