//! Git-backed template repositories.
//! Repositories are plain local checkouts kept in sync by shelling out to
//! git. Synchronization failures never abort a run; working offline is
//! normal, so they are downgraded to warnings.

use crate::config::Config;
use crate::constants::DEFAULT_MAIN_BRANCH;
use crate::error::{Error, Result};
use crate::walker::{walk_file_tree, Visitor};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A template repository listed in the user configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    /// The path to the repository root. A leading tilde expands to the
    /// home directory.
    pub path: String,
    /// The name of the main branch (e.g. master).
    #[serde(default = "default_main_branch")]
    pub main: String,
}

fn default_main_branch() -> String {
    DEFAULT_MAIN_BRANCH.to_string()
}

impl RepositoryInfo {
    /// The repository root with the tilde expanded.
    pub fn root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).into_owned())
    }
}

/// Synchronizes a repository with the latest remote version. Does nothing
/// if there are any local changes, or the repository is checked out to a
/// different branch.
///
/// Never fails: whatever goes wrong ends up as a warning and the run
/// continues with the checkout as it is.
pub fn sync_with_remote(repository: &RepositoryInfo) {
    if let Err(err) = try_sync(repository) {
        warn!("Failed to synchronize repository {}: {}", repository.path, err);
    }
}

fn try_sync(repository: &RepositoryInfo) -> Result<()> {
    let current_branch = exec_git(repository, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    if current_branch != repository.main {
        warn!(
            "Parent repository of '{}' is not on the main branch '{}'; Update skipped.",
            repository.path, repository.main
        );
        return Ok(());
    }

    let local_changes = exec_git(repository, &["status", "--porcelain"])?;
    if !local_changes.is_empty() {
        warn!(
            "Parent repository of '{}' contains uncommitted changes; Update skipped.",
            repository.path
        );
        return Ok(());
    }

    exec_git(repository, &["pull"])?;
    Ok(())
}

/// Attempts to detect the latest tagged version of a repository.
///
/// # Returns
/// * `Option<String>` - The highest version tag merged into the main
///   branch, or `None` when the repository has no tags or git fails
pub fn repo_version(repository: &RepositoryInfo) -> Option<String> {
    let merged = format!("--merged={}", repository.main);
    let tags = exec_git(repository, &["tag", "--sort=version:refname", &merged]).ok()?;
    tags.lines().last().map(str::to_string)
}

/// Attempts to list all known templates across the configured
/// repositories.
///
/// A template is a top-level subdirectory of a repository whose name does
/// not start with a dot. Unless `git_disabled` is set, every repository
/// is synchronized first.
///
/// # Arguments
/// * `config` - The user configuration naming the repositories
/// * `git_disabled` - Skips synchronization when set
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Absolute paths of the detected templates,
///   sorted per repository, in configuration order
pub fn list_known_templates(config: &Config, git_disabled: bool) -> Result<Vec<PathBuf>> {
    if !git_disabled {
        for repository in &config.repositories {
            sync_with_remote(repository);
        }
    }

    let mut list = Vec::new();
    for repository in &config.repositories {
        let mut collector = TemplateCollector { templates: Vec::new() };
        walk_file_tree(&repository.root(), &mut collector)?;
        collector.templates.sort();
        list.extend(collector.templates);
    }

    Ok(list)
}

struct TemplateCollector {
    templates: Vec<PathBuf>,
}

impl Visitor for TemplateCollector {
    fn pre_visit_dir(&mut self, path: &Path) -> Result<bool> {
        let hidden = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false);
        if !hidden {
            self.templates.push(path.to_path_buf());
        }

        // Templates live at the repository top level only.
        Ok(false)
    }
}

fn exec_git(repository: &RepositoryInfo, args: &[&str]) -> Result<String> {
    let output = exec("git", args, &repository.root())?;
    Ok(output.trim().to_string())
}

fn exec(program: &str, args: &[&str], cwd: &Path) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(Error::IoError)?;

    if !output.status.success() {
        return Err(Error::CommandFailed(output.status.code().unwrap_or(-1)));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
