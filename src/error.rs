//! Error handling for the Stencil application.
//! Defines custom error types and results used throughout the application.

use colored::Colorize;
use std::io;
use thiserror::Error;

/// Custom error types for Stencil operations.
///
/// This enum represents all possible errors that can occur within the
/// Stencil application. It implements the standard Error trait through
/// thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A command declared a malformed option or argument table
    #[error("Invalid command schema: {0}.")]
    SchemaError(String),

    /// An option token did not match any declared alias
    #[error("Unrecognized option: {0}.")]
    UnrecognizedOption(String),

    /// A value-taking option was given without a value
    #[error("Option {0} requires a value.")]
    OptionRequiresValue(String),

    /// A boolean option was given an inline value
    #[error("Option {0} does not accept a value.")]
    OptionRejectsValue(String),

    /// A required option was not present on the command line
    #[error("Missing required option {0}.")]
    MissingOption(String),

    /// More positional arguments than the command declares
    #[error("Too many arguments.")]
    TooManyArguments,

    /// A required positional argument was not provided
    #[error("Missing required argument: <{0}>.")]
    MissingArgument(String),

    /// The requested template matched nothing in any repository
    #[error("Template '{0}' not found. Use 'stencil list' for a list of available templates.")]
    TemplateNotFound(String),

    /// A template opened a tag that never closes
    #[error("Expected a closing tag %> in '{0}'.")]
    UnterminatedTag(String),

    /// A tag body could not be tokenized or parsed
    #[error("Template syntax error: {0}.")]
    SyntaxError(String),

    /// A tag body parsed but could not be evaluated
    #[error("Template evaluation error: {0}.")]
    EvalError(String),

    /// `env()` was called for an unset variable without a default
    #[error("Required environment variable {0} was not set.")]
    MissingEnvVar(String),

    /// Walking descended into a directory that is its own ancestor
    #[error("Symbolic link cycle detected at '{0}'.")]
    SymlinkCycle(String),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur during terminal interaction
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// A spawned subprocess exited with a non-zero status
    #[error("Process exited with non-zero code {0}.")]
    CommandFailed(i32),
}

/// Convenience type alias for Results with Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    std::process::exit(1);
}
