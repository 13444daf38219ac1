//! Scaffolding a new directory from a template.
//! Resolves the requested template, renders the preview tree and mirrors
//! the template directory onto the target, expanding template files and
//! copying everything else.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::repository::list_known_templates;
use crate::template::{is_template, strip_template_extension, Expander};
use crate::walker::{get_file_tree, walk_file_tree, FileTree, NodeId, NodeKind, Visitor};
use colored::Colorize;
use globset::GlobSet;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Resolves a template identifier to a template directory.
///
/// An identifier containing the path separator is taken as a path and
/// made absolute. Anything else is matched case-insensitively against the
/// tails of the known template paths, so `rust` finds `languages/rust`.
///
/// # Errors
/// * `Error::TemplateNotFound` if no known template matches
pub fn find_template(
    identifier: &str,
    config: &Config,
    git_disabled: bool,
) -> Result<PathBuf> {
    if identifier.contains(MAIN_SEPARATOR) {
        return Ok(std::path::absolute(identifier)?);
    }

    let templates = list_known_templates(config, git_disabled)?;
    let search = identifier.to_lowercase();
    templates
        .into_iter()
        .find(|template| template.to_string_lossy().to_lowercase().ends_with(&search))
        .ok_or_else(|| Error::TemplateNotFound(identifier.to_string()))
}

/// Captures the preview tree for a template, rerooted onto the target
/// path so the preview shows what will actually be created.
pub fn preview_tree(template_root: &Path, target_root: &Path) -> Result<FileTree> {
    let mut tree = get_file_tree(template_root)?;
    tree.rebase_root(target_root);
    Ok(tree)
}

/// Renders a captured file tree for display.
///
/// Directories carry a trailing separator; template files are shown green
/// with their extension stripped, plain files blue. Ignored entries and
/// everything below them are invisible.
pub fn render_tree(tree: &FileTree, ignored: &GlobSet) -> String {
    let mut output = String::new();
    render_entry(tree, FileTree::ROOT, "", ignored, &mut output);
    output
}

fn render_entry(
    tree: &FileTree,
    id: NodeId,
    prefix: &str,
    ignored: &GlobSet,
    output: &mut String,
) {
    let node = tree.node(id);
    if ignored.is_match(&node.path) {
        return;
    }

    // Children print the plain name; the root keeps its full path.
    let name = match node.parent {
        Some(_) => node
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        None => node.path.display().to_string(),
    };

    let label = match &node.kind {
        NodeKind::Directory { .. } => format!("{}{}", name, MAIN_SEPARATOR).bold(),
        NodeKind::File => {
            if is_template(Path::new(&name)) {
                strip_template_extension(Path::new(&name))
                    .display()
                    .to_string()
                    .green()
                    .bold()
            } else {
                name.blue().bold()
            }
        }
    };

    let is_last = tree.is_last_sibling(id);
    let glyph = if is_last { "└── " } else { "├── " };
    output.push_str(&format!("{}{}\n", format!("{}{}", prefix, glyph).dimmed(), label));

    if matches!(node.kind, NodeKind::Directory { .. }) {
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for &child in tree.entries(id) {
            render_entry(tree, child, &child_prefix, ignored, output);
        }
    }
}

/// Mirrors a template directory onto `target_root`.
///
/// The target root itself is created first, parents included; nested
/// directories are then created one by one as the walk reaches them, so a
/// pre-existing nested directory is reported as the IO error it is.
/// Template files land with their extension stripped and their tags
/// expanded, everything else is copied byte for byte.
///
/// # Arguments
/// * `template_root` - The resolved template directory
/// * `target_root` - The directory to create
/// * `expander` - Expansion state shared across all files of this run
/// * `ignored` - Entries to leave out
pub fn materialize(
    template_root: &Path,
    target_root: &Path,
    expander: Expander<'_>,
    ignored: &GlobSet,
) -> Result<()> {
    fs::create_dir_all(target_root)?;

    let mut visitor = ScaffoldVisitor { template_root, target_root, ignored, expander };
    walk_file_tree(template_root, &mut visitor)
}

struct ScaffoldVisitor<'a, 'p> {
    template_root: &'a Path,
    target_root: &'a Path,
    ignored: &'a GlobSet,
    expander: Expander<'p>,
}

impl ScaffoldVisitor<'_, '_> {
    fn destination(&self, source: &Path) -> Result<PathBuf> {
        let relative = source
            .strip_prefix(self.template_root)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        Ok(self.target_root.join(relative))
    }
}

impl Visitor for ScaffoldVisitor<'_, '_> {
    fn pre_visit_dir(&mut self, path: &Path) -> Result<bool> {
        if self.ignored.is_match(path) {
            return Ok(false);
        }

        fs::create_dir(self.destination(path)?)?;
        Ok(true)
    }

    fn visit_file(&mut self, path: &Path) -> Result<()> {
        if self.ignored.is_match(path) {
            return Ok(());
        }

        let destination = self.destination(path)?;
        if is_template(&destination) {
            let content = self.expander.expand_file(path)?;
            fs::write(strip_template_extension(&destination), content)?;
        } else {
            fs::copy(path, &destination)?;
        }

        Ok(())
    }
}
