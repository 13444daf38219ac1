//! Common constants used throughout the Stencil application.

/// Directory holding the user configuration, tilde-expanded at load time
pub const CONFIG_DIR: &str = "~/.config/stencil";

/// Supported configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["stencil.json", "stencil.yml", "stencil.yaml"];

/// The path suffix that marks a file for template expansion
pub const TEMPLATE_FILE_EXT: &str = ".template";

/// Branch assumed for repositories that do not configure one
pub const DEFAULT_MAIN_BRANCH: &str = "master";
