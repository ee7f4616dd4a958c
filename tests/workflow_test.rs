// tests/workflow_test.rs
use keepachangelog_manager::cli::{run_workflow, WorkflowArgs};
use keepachangelog_manager::clock::FixedClock;
use keepachangelog_manager::config::{parse_config, Config};
use keepachangelog_manager::domain::{BumpOptions, Version};
use keepachangelog_manager::git::MockRepository;
use keepachangelog_manager::ChangelogError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, MockRepository) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("myrepo");
    fs::create_dir(&root).unwrap();
    let repo = MockRepository::new(&root).with_remote("origin", "git@github.com:foo/myrepo.git");
    (dir, root, repo)
}

fn clock() -> FixedClock {
    FixedClock::new("2019-01-23")
}

fn bump(f: impl FnOnce(&mut BumpOptions)) -> BumpOptions {
    let mut options = BumpOptions::default();
    f(&mut options);
    options
}

#[test]
fn test_init_then_release() {
    let (_dir, root, repo) = setup();
    let config = Config::default();

    let init = WorkflowArgs {
        init: true,
        ..Default::default()
    };
    let result = run_workflow(&init, &config, &repo, &clock()).unwrap();
    assert!(result.created);
    assert!(result.release.is_none());
    assert_eq!(result.path, root.join("CHANGELOG.md"));

    let release = WorkflowArgs {
        bump: bump(|b| b.increment_minor = true),
        ..Default::default()
    };
    let result = run_workflow(&release, &config, &repo, &clock()).unwrap();
    assert!(!result.created);
    let outcome = result.release.unwrap();
    assert_eq!(outcome.previous, None);
    assert_eq!(outcome.version, Version::new(0, 1, 0));
    assert!(outcome.preview.is_none());

    let text = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();
    assert!(text.contains("## [0.1.0] - 2019-01-23"));
    assert!(text.contains(
        "[Unreleased]: https://github.com/foo/myrepo/compare/v0.1.0...HEAD\n\
         [0.1.0]: https://github.com/foo/myrepo/compare/v0.0.0...v0.1.0\n"
    ));
}

#[test]
fn test_init_and_bump_together() {
    let (_dir, root, repo) = setup();
    let args = WorkflowArgs {
        bump: bump(|b| b.patch = Some(5)),
        init: true,
        ..Default::default()
    };

    let result = run_workflow(&args, &Config::default(), &repo, &clock()).unwrap();
    assert!(result.created);
    assert_eq!(result.release.unwrap().version, Version::new(0, 0, 5));
    assert!(fs::read_to_string(root.join("CHANGELOG.md"))
        .unwrap()
        .contains("## [0.0.5] - 2019-01-23"));
}

#[test]
fn test_dry_run_leaves_file() {
    let (_dir, root, repo) = setup();
    let config = Config::default();
    let init = WorkflowArgs {
        init: true,
        ..Default::default()
    };
    run_workflow(&init, &config, &repo, &clock()).unwrap();
    let before = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();

    let args = WorkflowArgs {
        bump: bump(|b| b.increment_major = true),
        dry_run: true,
        ..Default::default()
    };
    let outcome = run_workflow(&args, &config, &repo, &clock())
        .unwrap()
        .release
        .unwrap();

    assert_eq!(outcome.version, Version::new(1, 0, 0));
    assert!(outcome.preview.unwrap().contains("## [1.0.0] - 2019-01-23"));
    assert_eq!(fs::read_to_string(root.join("CHANGELOG.md")).unwrap(), before);
}

#[test]
fn test_requires_exactly_one_option() {
    let (_dir, root, repo) = setup();
    let config = Config::default();

    let none = WorkflowArgs::default();
    assert!(matches!(
        run_workflow(&none, &config, &repo, &clock()),
        Err(ChangelogError::Validation(_))
    ));

    let two = WorkflowArgs {
        bump: bump(|b| {
            b.increment_patch = true;
            b.major = Some(2);
        }),
        init: true,
        ..Default::default()
    };
    assert!(matches!(
        run_workflow(&two, &config, &repo, &clock()),
        Err(ChangelogError::Validation(_))
    ));
    // Validation happens before anything is created
    assert!(!root.join("CHANGELOG.md").exists());
}

#[test]
fn test_missing_changelog_without_init() {
    let (_dir, _root, repo) = setup();
    let args = WorkflowArgs {
        bump: bump(|b| b.increment_patch = true),
        ..Default::default()
    };
    let err = run_workflow(&args, &Config::default(), &repo, &clock()).unwrap_err();
    assert!(matches!(err, ChangelogError::Io(_)));
}

#[test]
fn test_config_overrides_identity_and_location() {
    let (_dir, root, _repo) = setup();
    // No remotes at all: identity must come from config
    let repo = MockRepository::new(&root);
    let config = parse_config(
        r#"
changelog_file = "HISTORY.md"
host = "gitlab.example.com"

[repository]
owner = "acme"
name = "widgets"
"#,
    )
    .unwrap();

    let args = WorkflowArgs {
        bump: bump(|b| b.increment_patch = true),
        init: true,
        ..Default::default()
    };
    let result = run_workflow(&args, &config, &repo, &clock()).unwrap();
    assert_eq!(result.path, root.join("HISTORY.md"));

    let text = fs::read_to_string(root.join("HISTORY.md")).unwrap();
    assert!(text.contains(
        "[Unreleased]: https://gitlab.example.com/acme/widgets/compare/v0.0.1...HEAD"
    ));

    // The custom host is also recognised when reading the file back
    let again = WorkflowArgs {
        bump: bump(|b| b.increment_patch = true),
        ..Default::default()
    };
    let outcome = run_workflow(&again, &config, &repo, &clock())
        .unwrap()
        .release
        .unwrap();
    assert_eq!(outcome.previous, Some(Version::new(0, 0, 1)));
    assert_eq!(outcome.version, Version::new(0, 0, 2));
}

#[test]
fn test_missing_remote_is_reported() {
    let (_dir, root, _repo) = setup();
    let repo = MockRepository::new(&root);
    let args = WorkflowArgs {
        init: true,
        ..Default::default()
    };
    assert!(matches!(
        run_workflow(&args, &Config::default(), &repo, &clock()),
        Err(ChangelogError::NoGitRepo(_))
    ));
}
