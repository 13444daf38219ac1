//! Stencil's main application entry point.
//! Parses the merged option table, picks the requested command and routes
//! every failure through the default error handler.

use stencil::cli::{map_args, parse_options};
use stencil::commands;
use stencil::error::{default_error_handler, Result};
use stencil::logger::init_logger;

/// Main application entry point.
fn main() {
    if let Err(err) = run() {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Parses options against the merged table of all commands
/// 2. Initializes logging from the shared verbose flag
/// 3. Selects the command named by the first positional, falling back to
///    help for no or unknown names
/// 4. Maps the remaining positionals onto the command's argument slots
fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = parse_options(&commands::merged_options(), &args)?;

    init_logger(parsed.is_enabled(commands::VERBOSE));

    let command = parsed
        .args
        .first()
        .and_then(|name| commands::find(name))
        .unwrap_or_else(commands::help::command);

    let positionals = parsed.args.get(1..).unwrap_or(&[]);
    let mapped = map_args(command.args, positionals)?;

    (command.exec)(&commands::Invocation { options: parsed, args: mapped })
}
