//! Template expansion for the Stencil application.
//! A file whose path ends in `.template` is expanded by splicing the
//! result of every `<% … %>` tag into the surrounding text; any other
//! file passes through untouched.

pub mod expr;

use crate::constants::TEMPLATE_FILE_EXT;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use expr::{Functions, Value};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Checks whether a file path is considered a template.
pub fn is_template(path: &Path) -> bool {
    path.to_string_lossy().ends_with(TEMPLATE_FILE_EXT)
}

/// Removes the template extension from a template file path, or does
/// nothing if the path is not a template.
pub fn strip_template_extension(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    match text.strip_suffix(TEMPLATE_FILE_EXT) {
        Some(stripped) => PathBuf::from(stripped),
        None => path.to_path_buf(),
    }
}

/// Carries everything a template may reach while it expands: the
/// interactive prompter, a snapshot of the environment and the answers
/// collected so far.
///
/// One expander lives for a whole scaffolding run, so a variable asked
/// for by one file is already answered when the next file wants it.
pub struct Expander<'a> {
    prompter: &'a dyn Prompter,
    env: HashMap<String, String>,
    answers: IndexMap<String, String>,
}

impl<'a> Expander<'a> {
    /// Creates an expander over a snapshot of the current process
    /// environment.
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self::with_env(prompter, std::env::vars().collect())
    }

    /// Creates an expander over an explicit environment snapshot.
    pub fn with_env(prompter: &'a dyn Prompter, env: HashMap<String, String>) -> Self {
        Expander { prompter, env, answers: IndexMap::new() }
    }

    /// Expands a single file into a string.
    ///
    /// The file is read through its canonical path, so relative `ext()`
    /// imports keep resolving correctly when the file is addressed
    /// through a link. Whether expansion happens at all is decided by the
    /// path as given: only a path carrying the template extension is
    /// expanded, everything else is returned verbatim.
    ///
    /// # Arguments
    /// * `path` - The file to expand
    ///
    /// # Returns
    /// * `Result<String>` - The expanded contents
    pub fn expand_file(&mut self, path: &Path) -> Result<String> {
        // Since templates can be linked and contain relative import paths
        // at the same time, the actual location of the file decides how
        // imports resolve.
        let canonical = fs::canonicalize(path)?;
        let source = fs::read_to_string(&canonical)?;
        if !is_template(path) {
            return Ok(source);
        }

        self.expand_source(&source, &canonical)
    }

    /// Expands template source text, splicing the result of every
    /// `<% … %>` tag into the surrounding text.
    ///
    /// Tags do not nest; scanning resumes directly after each closing
    /// delimiter. `file` names the source in errors and anchors relative
    /// `ext()` imports.
    ///
    /// # Errors
    /// * `Error::UnterminatedTag` if a tag is opened but never closed
    /// * Syntax and evaluation errors from the tag expressions
    pub fn expand_source(&mut self, source: &str, file: &Path) -> Result<String> {
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut scope = Scope { expander: self, dir };

        let mut result = String::new();
        let mut anchor = 0;

        while let Some(offset) = source[anchor..].find("<%") {
            let start = anchor + offset;
            let body_start = start + 2;

            let Some(end_offset) = source[body_start..].find("%>") else {
                return Err(Error::UnterminatedTag(file.display().to_string()));
            };
            let end = body_start + end_offset;

            let expression = expr::parse_expression(&source[body_start..end])?;
            let value = expr::eval(&expression, &mut scope)?;

            result.push_str(&source[anchor..start]);
            result.push_str(&value.render());
            anchor = end + 2;
        }

        result.push_str(&source[anchor..]);
        Ok(result)
    }
}

/// The function surface exposed to tag expressions, bound to the file
/// currently being expanded.
struct Scope<'e, 'p> {
    expander: &'e mut Expander<'p>,
    dir: PathBuf,
}

impl Functions for Scope<'_, '_> {
    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        match name {
            "ask" => self.ask(args),
            "env" => self.env(args),
            "ext" => self.ext(args),
            _ => Err(Error::EvalError(format!("unknown function '{}'", name))),
        }
    }
}

impl Scope<'_, '_> {
    /// `ask(name)` / `ask(name, default)`: prompts once per variable and
    /// reuses the stored answer afterwards, no matter which file asks.
    fn ask(&mut self, args: Vec<Value>) -> Result<Value> {
        let (name, default) = split_name_and_default(args, "ask")?;
        if let Some(answer) = self.expander.answers.get(&name) {
            return Ok(Value::Str(answer.clone()));
        }

        let answer = self.expander.prompter.ask(&name, default.as_deref())?;
        self.expander.answers.insert(name, answer.clone());
        Ok(Value::Str(answer))
    }

    /// `env(name)` / `env(name, default)`: reads the snapshot taken when
    /// the expander was created. A variable set to the empty string
    /// counts as present.
    fn env(&mut self, args: Vec<Value>) -> Result<Value> {
        let (name, default) = split_name_and_default(args, "env")?;
        if let Some(value) = self.expander.env.get(&name) {
            return Ok(Value::Str(value.clone()));
        }

        match default {
            Some(default) => Ok(Value::Str(default)),
            None => Err(Error::MissingEnvVar(name)),
        }
    }

    /// `ext(path)`: expands another file relative to the current one and
    /// splices in the result. Shares the answer store, so included files
    /// never re-prompt.
    fn ext(&mut self, args: Vec<Value>) -> Result<Value> {
        match args.as_slice() {
            [Value::Str(import)] => {
                let resolved = self.dir.join(import);
                let content = self.expander.expand_file(&resolved)?;
                Ok(Value::Str(content))
            }
            _ => Err(Error::EvalError("ext() expects a single string path".to_string())),
        }
    }
}

fn split_name_and_default(
    args: Vec<Value>,
    function: &str,
) -> Result<(String, Option<String>)> {
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (Some(Value::Str(name)), None, None) => Ok((name, None)),
        (Some(Value::Str(name)), Some(Value::Str(default)), None) => {
            Ok((name, Some(default)))
        }
        _ => Err(Error::EvalError(format!(
            "{}() expects a name and an optional default, both strings",
            function
        ))),
    }
}
