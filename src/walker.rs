//! Recursive file-tree traversal for the Stencil application.
//! Provides a visitor-driven walk over a directory plus an arena-backed
//! snapshot of the tree used for previews.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Callbacks invoked while walking a file tree.
///
/// Every method has a default implementation, so a visitor only overrides
/// the hooks it cares about.
pub trait Visitor {
    /// Runs before a directory is descended into. Not invoked for the walk
    /// root. Returning `Ok(false)` skips the directory entirely: none of
    /// its entries are visited and no matching [`Visitor::post_visit_dir`]
    /// call is made.
    fn pre_visit_dir(&mut self, _path: &Path) -> Result<bool> {
        Ok(true)
    }

    /// Runs for every file.
    fn visit_file(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Runs after all entries of a directory have been visited. Invoked
    /// for the walk root as well.
    fn post_visit_dir(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Recursively walks a file tree, visiting every nested directory and file
/// within it.
///
/// Symbolic links are resolved against their containing directory and
/// re-dispatched under the link path, so a link to a directory is walked
/// and a link to a file is visited, both named as addressed. Entries are
/// visited in the order the underlying directory iteration yields them.
///
/// # Arguments
/// * `dir_path` - Path to the directory where to start walking the tree
/// * `visitor` - The visitor callbacks to run
///
/// # Errors
/// * `Error::SymlinkCycle` when descending into a directory that is
///   already an ancestor of itself
/// * `Error::IoError` for unreadable entries and dangling links
pub fn walk_file_tree(dir_path: &Path, visitor: &mut dyn Visitor) -> Result<()> {
    let mut ancestors = Vec::new();
    walk_dir(dir_path, visitor, &mut ancestors, true)
}

fn walk_dir(
    dir_path: &Path,
    visitor: &mut dyn Visitor,
    ancestors: &mut Vec<PathBuf>,
    is_first: bool,
) -> Result<()> {
    if !is_first && !visitor.pre_visit_dir(dir_path)? {
        return Ok(());
    }

    // Links make it possible for a directory to contain itself. The walk
    // tracks the resolved path of every directory it is currently inside
    // of and refuses to enter one twice.
    let canonical = fs::canonicalize(dir_path)?;
    if ancestors.contains(&canonical) {
        return Err(Error::SymlinkCycle(dir_path.display().to_string()));
    }

    ancestors.push(canonical);
    for entry in fs::read_dir(dir_path)? {
        let entry = entry?;
        let entry_path = dir_path.join(entry.file_name());
        visit_entry(dir_path, &entry_path, entry.file_type()?, visitor, ancestors)?;
    }
    ancestors.pop();

    visitor.post_visit_dir(dir_path)
}

fn visit_entry(
    parent_dir: &Path,
    entry_path: &Path,
    file_type: fs::FileType,
    visitor: &mut dyn Visitor,
    ancestors: &mut Vec<PathBuf>,
) -> Result<()> {
    if file_type.is_dir() {
        walk_dir(entry_path, visitor, ancestors, false)
    } else if file_type.is_file() {
        visitor.visit_file(entry_path)
    } else if file_type.is_symlink() {
        let target = fs::read_link(entry_path)?;
        let resolved = parent_dir.join(target);

        // metadata() follows any remaining links, so the re-dispatched
        // type can no longer be a symlink and the recursion terminates.
        let metadata = fs::metadata(&resolved)?;
        visit_entry(parent_dir, entry_path, metadata.file_type(), visitor, ancestors)
    } else {
        Ok(())
    }
}

/// Index of a node within a [`FileTree`] arena.
pub type NodeId = usize;

/// Distinguishes files from directories within a [`FileTree`].
#[derive(Debug, PartialEq)]
pub enum NodeKind {
    File,
    Directory { entries: Vec<NodeId> },
}

/// A single entry of a captured file tree.
#[derive(Debug)]
pub struct FileNode {
    /// Path of this entry, as addressed during the walk.
    pub path: PathBuf,
    /// Arena index of the containing directory, `None` for the root.
    pub parent: Option<NodeId>,
    /// What this entry is.
    pub kind: NodeKind,
}

/// An arena-backed snapshot of a directory tree.
///
/// Nodes refer to each other through arena indices instead of owning
/// pointers, so parent links come for free without reference cycles.
#[derive(Debug)]
pub struct FileTree {
    nodes: Vec<FileNode>,
}

impl FileTree {
    /// Arena index of the root directory node.
    pub const ROOT: NodeId = 0;

    /// Returns the node stored under `id`.
    pub fn node(&self, id: NodeId) -> &FileNode {
        &self.nodes[id]
    }

    /// Returns the child nodes of `id`, empty for files.
    pub fn entries(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id].kind {
            NodeKind::Directory { entries } => entries,
            NodeKind::File => &[],
        }
    }

    /// Replaces the root path, leaving all child paths untouched. Used to
    /// preview a template tree as if it already lived at its target.
    pub fn rebase_root(&mut self, path: &Path) {
        self.nodes[Self::ROOT].path = path.to_path_buf();
    }

    /// Returns whether `id` is the last entry of its parent directory.
    /// The root counts as a last sibling.
    pub fn is_last_sibling(&self, id: NodeId) -> bool {
        match self.nodes[id].parent {
            Some(parent) => self.entries(parent).last() == Some(&id),
            None => true,
        }
    }

    // Directories first, then files, each group sorted by name. Keeps the
    // preview stable across platforms with differing readdir order.
    fn sort_entries(&mut self) {
        for index in 0..self.nodes.len() {
            let mut entries = match &self.nodes[index].kind {
                NodeKind::Directory { entries } => entries.clone(),
                NodeKind::File => continue,
            };

            let nodes = &self.nodes;
            entries.sort_by(|&left, &right| {
                let left_is_dir =
                    matches!(nodes[left].kind, NodeKind::Directory { .. });
                let right_is_dir =
                    matches!(nodes[right].kind, NodeKind::Directory { .. });
                right_is_dir
                    .cmp(&left_is_dir)
                    .then_with(|| nodes[left].path.file_name().cmp(&nodes[right].path.file_name()))
            });

            if let NodeKind::Directory { entries: slot } = &mut self.nodes[index].kind {
                *slot = entries;
            }
        }
    }
}

struct TreeBuilder {
    nodes: Vec<FileNode>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    fn attach(&mut self, node: FileNode) -> NodeId {
        let id = self.nodes.len();
        let parent = node.parent;
        self.nodes.push(node);

        if let Some(parent) = parent {
            if let NodeKind::Directory { entries } = &mut self.nodes[parent].kind {
                entries.push(id);
            }
        }

        id
    }
}

impl Visitor for TreeBuilder {
    fn pre_visit_dir(&mut self, path: &Path) -> Result<bool> {
        let parent = self.stack.last().copied();
        let id = self.attach(FileNode {
            path: path.to_path_buf(),
            parent,
            kind: NodeKind::Directory { entries: Vec::new() },
        });
        self.stack.push(id);
        Ok(true)
    }

    fn visit_file(&mut self, path: &Path) -> Result<()> {
        let parent = self.stack.last().copied();
        self.attach(FileNode { path: path.to_path_buf(), parent, kind: NodeKind::File });
        Ok(())
    }

    fn post_visit_dir(&mut self, _path: &Path) -> Result<()> {
        self.stack.pop();
        Ok(())
    }
}

/// Gathers the nested structure of a directory and its contents.
///
/// # Arguments
/// * `root_dir_path` - Path to the directory to scan
///
/// # Returns
/// * `Result<FileTree>` - The captured tree, entries sorted for display
pub fn get_file_tree(root_dir_path: &Path) -> Result<FileTree> {
    let root = FileNode {
        path: root_dir_path.to_path_buf(),
        parent: None,
        kind: NodeKind::Directory { entries: Vec::new() },
    };

    let mut builder = TreeBuilder { nodes: vec![root], stack: vec![FileTree::ROOT] };
    walk_file_tree(root_dir_path, &mut builder)?;

    let mut tree = FileTree { nodes: builder.nodes };
    tree.sort_entries();
    Ok(tree)
}
