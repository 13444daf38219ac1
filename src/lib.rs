//! Stencil is a project scaffolding tool.
//! It materializes new directories from template directories kept in
//! git-backed repositories, expanding `.template` files through a small
//! embedded expression language along the way.

/// Option parsing and positional argument mapping
pub mod cli;

/// The command registry and the individual commands
pub mod commands;

/// User configuration handling
/// Supports JSON and YAML formats (stencil.json, stencil.yml, stencil.yaml)
pub mod config;

/// Common constants used throughout the application
pub mod constants;

/// Error types and handling for the Stencil application
pub mod error;

/// Fixed file and directory ignore patterns
/// Keeps version-control internals out of previews and output
pub mod ignore;

/// Logger initialization
pub mod logger;

/// User input and interaction handling
pub mod prompt;

/// Git-backed template repository handling
/// Synchronization, version detection and template discovery
pub mod repository;

/// Orchestration of a scaffolding run
/// Combines all components to generate the final output
pub mod scaffold;

/// Template expansion and the tag expression language
pub mod template;

/// Visitor-driven file tree traversal
pub mod walker;
