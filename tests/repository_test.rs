use std::fs;
use std::path::PathBuf;
use stencil::config::Config;
use stencil::error::Error;
use stencil::repository::{list_known_templates, repo_version, sync_with_remote, RepositoryInfo};
use tempfile::TempDir;

fn repository(path: &str) -> RepositoryInfo {
    RepositoryInfo { path: path.to_string(), main: "master".to_string() }
}

#[test]
fn test_repository_root_passes_plain_paths_through() {
    let info = repository("/srv/templates");
    assert_eq!(info.root(), PathBuf::from("/srv/templates"));
}

#[test]
fn test_repository_root_expands_the_tilde() {
    let info = repository("~/templates");
    let root = info.root();

    assert!(!root.to_string_lossy().contains('~'));
    assert!(root.ends_with("templates"));
}

#[test_log::test]
fn test_sync_is_best_effort() {
    // Not a git repository; the failure is logged and swallowed.
    let dir = TempDir::new().unwrap();
    sync_with_remote(&repository(&dir.path().display().to_string()));
}

#[test]
fn test_repo_version_is_none_outside_a_repository() {
    let dir = TempDir::new().unwrap();
    let info = repository(&dir.path().display().to_string());

    assert_eq!(repo_version(&info), None);
}

#[test_log::test]
fn test_list_known_templates() {
    let repo_a = TempDir::new().unwrap();
    fs::create_dir(repo_a.path().join("zeta")).unwrap();
    fs::create_dir(repo_a.path().join("alpha")).unwrap();
    fs::create_dir(repo_a.path().join("alpha").join("nested")).unwrap();
    fs::create_dir(repo_a.path().join(".hidden")).unwrap();
    fs::write(repo_a.path().join("README.md"), "not a template").unwrap();

    let repo_b = TempDir::new().unwrap();
    fs::create_dir(repo_b.path().join("beta")).unwrap();

    let config = Config {
        repositories: vec![
            repository(&repo_a.path().display().to_string()),
            repository(&repo_b.path().display().to_string()),
        ],
    };

    let templates = list_known_templates(&config, true).unwrap();

    // Top-level non-dot directories only, sorted per repository, in
    // configuration order.
    assert_eq!(
        templates,
        vec![
            repo_a.path().join("alpha"),
            repo_a.path().join("zeta"),
            repo_b.path().join("beta"),
        ]
    );
}

#[test]
fn test_listing_a_missing_repository_fails() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("nowhere");
    let config = Config { repositories: vec![repository(&gone.display().to_string())] };

    let result = list_known_templates(&config, true);
    assert!(matches!(result, Err(Error::IoError(_))));
}
