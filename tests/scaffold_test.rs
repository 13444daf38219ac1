mod common;

use colored::control;
use common::ScriptedPrompter;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, MAIN_SEPARATOR};
use stencil::config::Config;
use stencil::error::Error;
use stencil::ignore::ignore_set;
use stencil::repository::RepositoryInfo;
use stencil::scaffold::{find_template, materialize, preview_tree, render_tree};
use stencil::template::Expander;
use tempfile::TempDir;

fn repository(root: &Path) -> Config {
    Config {
        repositories: vec![RepositoryInfo {
            path: root.display().to_string(),
            main: "master".to_string(),
        }],
    }
}

#[test]
fn test_find_template_matches_case_insensitively() {
    let repo = TempDir::new().unwrap();
    fs::create_dir(repo.path().join("Rust")).unwrap();
    fs::create_dir(repo.path().join("python")).unwrap();

    let config = repository(repo.path());
    let found = find_template("rust", &config, true).unwrap();

    assert_eq!(found, repo.path().join("Rust"));
}

#[test]
fn test_find_template_reports_unknown_identifiers() {
    let repo = TempDir::new().unwrap();
    fs::create_dir(repo.path().join("rust")).unwrap();

    let config = repository(repo.path());
    let result = find_template("missing", &config, true);

    if let Err(Error::TemplateNotFound(name)) = result {
        assert_eq!(name, "missing");
    } else {
        panic!("Expected Error::TemplateNotFound");
    }
}

#[test]
fn test_find_template_takes_paths_as_given() {
    let dir = TempDir::new().unwrap();
    let identifier = dir.path().display().to_string();

    // No repositories are consulted when the identifier is a path.
    let found = find_template(&identifier, &Config::default(), true).unwrap();
    assert_eq!(found, dir.path());
}

#[test]
fn test_materialize_expands_and_copies() {
    let template = TempDir::new().unwrap();
    fs::write(
        template.path().join("README.md.template"),
        "Hello <% env('USER', 'world') %>!\n",
    )
    .unwrap();
    fs::write(template.path().join("LICENSE"), "MIT\n").unwrap();
    fs::create_dir(template.path().join("src")).unwrap();
    fs::write(template.path().join("src").join("main.rs"), "fn main() {}\n").unwrap();
    fs::create_dir(template.path().join(".git")).unwrap();
    fs::write(template.path().join(".git").join("config"), "[core]\n").unwrap();

    let out = TempDir::new().unwrap();
    let target = out.path().join("project");

    let prompter = ScriptedPrompter::new();
    let expander = Expander::with_env(&prompter, HashMap::new());
    materialize(template.path(), &target, expander, &ignore_set().unwrap()).unwrap();

    // Template files land expanded, with the extension stripped.
    assert_eq!(
        fs::read_to_string(target.join("README.md")).unwrap(),
        "Hello world!\n"
    );
    assert!(!target.join("README.md.template").exists());

    // Everything else is copied byte for byte.
    assert_eq!(fs::read_to_string(target.join("LICENSE")).unwrap(), "MIT\n");
    assert_eq!(
        fs::read_to_string(target.join("src").join("main.rs")).unwrap(),
        "fn main() {}\n"
    );

    // Ignored entries never make it across.
    assert!(!target.join(".git").exists());
}

#[test]
fn test_materialize_mirrors_plain_trees_exactly() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("plain.txt"), "plain").unwrap();
    fs::create_dir(template.path().join("sub")).unwrap();
    fs::write(template.path().join("sub").join("inner.txt"), "inner").unwrap();

    let out = TempDir::new().unwrap();
    let target = out.path().join("copy");

    let prompter = ScriptedPrompter::new();
    let expander = Expander::with_env(&prompter, HashMap::new());
    materialize(template.path(), &target, expander, &ignore_set().unwrap()).unwrap();

    assert!(!dir_diff::is_different(template.path(), &target).unwrap());
}

#[test]
fn test_materialize_fails_on_existing_nested_directories() {
    let template = TempDir::new().unwrap();
    fs::create_dir(template.path().join("sub")).unwrap();
    fs::write(template.path().join("sub").join("x.txt"), "x").unwrap();

    let out = TempDir::new().unwrap();
    let target = out.path().join("project");
    fs::create_dir_all(target.join("sub")).unwrap();

    let prompter = ScriptedPrompter::new();
    let expander = Expander::with_env(&prompter, HashMap::new());
    let result = materialize(template.path(), &target, expander, &ignore_set().unwrap());

    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_render_tree_output() {
    control::set_override(false);

    let template = TempDir::new().unwrap();
    fs::create_dir(template.path().join("sub")).unwrap();
    fs::write(template.path().join("sub").join("file.txt"), "").unwrap();
    fs::write(template.path().join("note.txt.template"), "").unwrap();
    fs::write(template.path().join("plain.txt"), "").unwrap();
    fs::write(template.path().join("top"), "").unwrap();

    let target = Path::new("/somewhere/app");
    let tree = preview_tree(template.path(), target).unwrap();
    let rendered = render_tree(&tree, &ignore_set().unwrap());

    let expected = [
        format!("└── {}{}", target.display(), MAIN_SEPARATOR),
        format!("    ├── sub{}", MAIN_SEPARATOR),
        "    │   └── file.txt".to_string(),
        "    ├── note.txt".to_string(),
        "    ├── plain.txt".to_string(),
        "    └── top".to_string(),
    ]
    .join("\n")
        + "\n";

    assert_eq!(rendered, expected);
}

#[test]
fn test_render_tree_hides_ignored_entries() {
    control::set_override(false);

    let template = TempDir::new().unwrap();
    fs::create_dir(template.path().join(".git")).unwrap();
    fs::write(template.path().join(".git").join("HEAD"), "ref").unwrap();
    fs::write(template.path().join(".DS_Store"), "").unwrap();
    fs::write(template.path().join("keep.txt"), "").unwrap();

    let tree = preview_tree(template.path(), Path::new("/app")).unwrap();
    let rendered = render_tree(&tree, &ignore_set().unwrap());

    assert!(rendered.contains("keep.txt"));
    assert!(!rendered.contains(".git"));
    assert!(!rendered.contains(".DS_Store"));
}
