//! File and directory ignore handling.
//! Version-control internals and OS litter are excluded from previews and
//! generated output alike.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Entries excluded from every scaffolding run.
pub const IGNORED_PATTERNS: [&str; 2] = ["**/.git", "**/.DS_Store"];

/// Compiles the fixed ignore patterns into a matchable set.
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns for path matching
pub fn ignore_set() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in IGNORED_PATTERNS {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::ConfigError(format!("invalid ignore pattern: {}", e)))?,
        );
    }

    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("invalid ignore pattern: {}", e)))
}
