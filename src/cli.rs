//! Command-line option and argument handling for the Stencil application.
//! Options are parsed out of a flat token vector against a table of
//! definitions; the leftover positionals are then mapped onto the named
//! argument slots a command declares.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Describes a single command-line option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDef {
    /// Key under which the parsed value is stored.
    pub key: &'static str,
    /// Long aliases, matched as `--alias`.
    pub long: &'static [&'static str],
    /// Short aliases, matched as `-a`.
    pub short: &'static [char],
    /// Whether the option requires a string value. By default options are
    /// boolean flags (set / not set) and are not required.
    pub has_value: bool,
    /// Default value for a value-taking option. When set, the option
    /// becomes optional.
    pub default: Option<&'static str>,
    /// One-line description shown by the help command.
    pub description: &'static str,
}

/// Describes a positional argument of a command.
#[derive(Debug, Clone, Copy)]
pub struct ArgDef {
    /// The name of the argument.
    pub name: &'static str,
    /// Controls whether the argument may be omitted.
    pub is_optional: bool,
}

/// A parsed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// State of a boolean flag.
    Flag(bool),
    /// Value of a value-taking option.
    Value(String),
}

/// Holds parsed options and any remaining positional arguments.
#[derive(Debug, Default)]
pub struct ParsedOptions {
    /// Parsed option values, keyed by definition key.
    pub options: IndexMap<String, OptionValue>,
    /// Remaining positional arguments, in their original relative order.
    pub args: Vec<String>,
}

impl ParsedOptions {
    /// Returns whether the boolean flag stored under `key` is set.
    pub fn is_enabled(&self, key: &str) -> bool {
        matches!(self.options.get(key), Some(OptionValue::Flag(true)))
    }

    /// Returns the value of the value-taking option stored under `key`.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        match self.options.get(key) {
            Some(OptionValue::Value(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// A map of named positional arguments, filled by [`map_args`].
#[derive(Debug, Default)]
pub struct ArgumentMap(IndexMap<String, String>);

impl ArgumentMap {
    /// Returns the argument mapped under `name`, if it was provided.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the argument mapped under `name` or a `MissingArgument` error.
    pub fn required(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::MissingArgument(name.to_string()))
    }
}

fn option_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:-([a-z0-9]+)|--([a-z0-9]+(?:-[a-z0-9]+)*)(?:=(.*))?)$").unwrap()
    })
}

fn build_alias_map<'a>(
    definitions: &'a [OptionDef],
) -> Result<HashMap<String, &'a OptionDef>> {
    let mut aliases: HashMap<String, &OptionDef> = HashMap::new();

    for definition in definitions {
        for alias in definition.long {
            if alias.is_empty() {
                return Err(Error::SchemaError(
                    "option alias must not be an empty string".to_string(),
                ));
            }

            if aliases.insert(format!("--{}", alias), definition).is_some() {
                return Err(Error::SchemaError(format!(
                    "alias --{} is used by multiple options",
                    alias
                )));
            }
        }

        for alias in definition.short {
            if aliases.insert(format!("-{}", alias), definition).is_some() {
                return Err(Error::SchemaError(format!(
                    "alias -{} is used by multiple options",
                    alias
                )));
            }
        }
    }

    Ok(aliases)
}

fn lookup<'a>(
    aliases: &HashMap<String, &'a OptionDef>,
    key: &str,
) -> Result<&'a OptionDef> {
    aliases.get(key).copied().ok_or_else(|| Error::UnrecognizedOption(key.to_string()))
}

/// Parses options from incoming command-line arguments.
///
/// Scans `args` left to right, removing every token that matches a declared
/// option (plus its value token, when one is consumed) and recording the
/// parsed value under the definition key. Tokens that do not look like
/// options are left in place; a literal `--` is consumed and stops the
/// scan, leaving everything after it positional.
///
/// # Arguments
/// * `definitions` - The table of option definitions to parse against
/// * `args` - The provided command-line arguments
///
/// # Returns
/// * `Result<ParsedOptions>` - The parsed options plus remaining positionals
///
/// # Errors
/// * `Error::SchemaError` if the definition table itself is malformed
/// * `Error::UnrecognizedOption` for an option token with no definition
/// * `Error::OptionRequiresValue` / `Error::OptionRejectsValue` on value
///   mismatches
/// * `Error::MissingOption` if a required option was never provided
pub fn parse_options(definitions: &[OptionDef], args: &[String]) -> Result<ParsedOptions> {
    let aliases = build_alias_map(definitions)?;

    let mut result = ParsedOptions { options: IndexMap::new(), args: args.to_vec() };

    // Prepare default values and keep track of required options.
    let mut required = Vec::new();
    for definition in definitions {
        if definition.has_value {
            match definition.default {
                Some(default) => {
                    result.options.insert(
                        definition.key.to_string(),
                        OptionValue::Value(default.to_string()),
                    );
                }
                None => required.push(definition),
            }
        } else {
            result.options.insert(definition.key.to_string(), OptionValue::Flag(false));
        }
    }

    let mut i = 0;
    while i < result.args.len() {
        if result.args[i] == "--" {
            result.args.remove(i);
            break;
        }

        let token = result.args[i].clone();
        let Some(capture) = option_pattern().captures(&token) else {
            i += 1;
            continue;
        };

        let mut size = 1;
        if let Some(cluster) = capture.get(1) {
            let shorts: Vec<char> = cluster.as_str().chars().collect();
            if shorts.len() == 1 {
                // Single short option, e.g.: -x
                let definition = lookup(&aliases, &token)?;
                if definition.has_value {
                    let value = result
                        .args
                        .get(i + 1)
                        .cloned()
                        .ok_or_else(|| Error::OptionRequiresValue(token.clone()))?;
                    result
                        .options
                        .insert(definition.key.to_string(), OptionValue::Value(value));
                    size = 2;
                } else {
                    result
                        .options
                        .insert(definition.key.to_string(), OptionValue::Flag(true));
                }
            } else {
                // Multiple short options, e.g.: -xyz
                for alias in shorts {
                    let key = format!("-{}", alias);
                    let definition = lookup(&aliases, &key)?;
                    if definition.has_value {
                        return Err(Error::OptionRequiresValue(key));
                    }

                    result
                        .options
                        .insert(definition.key.to_string(), OptionValue::Flag(true));
                }
            }
        } else if let Some(name) = capture.get(2) {
            let key = format!("--{}", name.as_str());
            let inline = capture.get(3).map(|value| value.as_str().to_string());

            let definition = lookup(&aliases, &key)?;
            if definition.has_value {
                let value = match inline {
                    Some(value) => value,
                    None => {
                        size = 2;
                        result
                            .args
                            .get(i + 1)
                            .cloned()
                            .ok_or_else(|| Error::OptionRequiresValue(key))?
                    }
                };
                result.options.insert(definition.key.to_string(), OptionValue::Value(value));
            } else {
                if inline.is_some() {
                    return Err(Error::OptionRejectsValue(key));
                }

                result.options.insert(definition.key.to_string(), OptionValue::Flag(true));
            }
        }

        result.args.drain(i..i + size);
    }

    // Check for missing required options.
    for definition in required {
        if !result.options.contains_key(definition.key) {
            let name = definition
                .long
                .first()
                .map(|alias| format!("--{}", alias))
                .or_else(|| definition.short.first().map(|alias| format!("-{}", alias)))
                .unwrap_or_else(|| definition.key.to_string());
            return Err(Error::MissingOption(name));
        }
    }

    Ok(result)
}

/// Maps incoming positional arguments according to command argument
/// definitions.
///
/// Arguments are assigned to slots by position. Required slots must come
/// before every optional slot; a definition list violating that rule is
/// rejected before any mapping happens.
///
/// # Arguments
/// * `definitions` - The argument slots the command declares
/// * `args` - The provided positional arguments
///
/// # Returns
/// * `Result<ArgumentMap>` - The mapped arguments
///
/// # Errors
/// * `Error::SchemaError` if a required slot follows an optional one
/// * `Error::TooManyArguments` if more arguments than slots were provided
/// * `Error::MissingArgument` if a required slot stays unfilled
pub fn map_args(definitions: &[ArgDef], args: &[String]) -> Result<ArgumentMap> {
    for (i, definition) in definitions.iter().enumerate() {
        if !definition.is_optional && i != 0 && definitions[i - 1].is_optional {
            return Err(Error::SchemaError(format!(
                "required argument <{}> must not be preceded by optional arguments",
                definition.name
            )));
        }
    }

    if definitions.len() < args.len() {
        return Err(Error::TooManyArguments);
    }

    let mut map = IndexMap::new();
    for (definition, value) in definitions.iter().zip(args) {
        map.insert(definition.name.to_string(), value.clone());
    }

    if args.len() < definitions.len() && !definitions[args.len()].is_optional {
        return Err(Error::MissingArgument(definitions[args.len()].name.to_string()));
    }

    Ok(ArgumentMap(map))
}
