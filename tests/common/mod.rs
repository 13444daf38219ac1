use std::cell::RefCell;
use std::collections::VecDeque;

use stencil::error::{Error, Result};
use stencil::prompt::Prompter;

/// A prompter fed from a script instead of a terminal. Asking more
/// questions than were scripted is an error, so tests catch unexpected
/// prompts instead of hanging.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    confirmations: RefCell<VecDeque<bool>>,
}

#[allow(dead_code)]
impl ScriptedPrompter {
    pub fn new() -> Self {
        ScriptedPrompter {
            answers: RefCell::new(VecDeque::new()),
            confirmations: RefCell::new(VecDeque::new()),
        }
    }

    pub fn answer(self, input: &str) -> Self {
        self.answers.borrow_mut().push_back(input.to_string());
        self
    }

    pub fn confirmation(self, answer: bool) -> Self {
        self.confirmations.borrow_mut().push_back(answer);
        self
    }

    /// Number of scripted answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, name: &str, default: Option<&str>) -> Result<String> {
        let input =
            self.answers.borrow_mut().pop_front().ok_or_else(|| {
                Error::PromptError(format!("unscripted prompt for '{}'", name))
            })?;

        if input.is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }

        Ok(input)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.confirmations.borrow_mut().pop_front().ok_or_else(|| {
            Error::PromptError(format!("unscripted confirmation for '{}'", prompt))
        })
    }
}
