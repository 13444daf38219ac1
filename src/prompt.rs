//! User input and interaction handling.
//! Prompting sits behind a trait so tests can script answers instead of
//! driving a terminal.

use crate::error::{Error, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input};

/// Interactive questions asked during a scaffolding run.
pub trait Prompter {
    /// Asks the user for the value of a template variable. Empty input
    /// resolves to `default` when one is given, otherwise to the empty
    /// string.
    fn ask(&self, name: &str, default: Option<&str>) -> Result<String>;

    /// Asks the user a yes/no question.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Terminal-backed [`Prompter`] implementation.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        DialoguerPrompter
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, name: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(format!("Asking for {}", name.bold()))
            .allow_empty(true);

        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
