use pretty_assertions::assert_eq;

use crate::repo::config::Config;
use crate::repo::Repo;
use crate::test::{scratch_dir, TestResult};
use crate::{ErrorKind, Operation};

#[test]
/// Init an empty directory and check every file and directory of the skeleton, byte for byte.
fn init_layout() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    let repo = Repo::init(&root)?;

    let git_dir = root.join(".git");
    assert_eq!(repo.git_dir().root(), git_dir);
    assert_eq!(repo.worktree(), root);

    for dir in ["branches", "objects", "refs/tags", "refs/heads"] {
        let dir = git_dir.join(dir);
        assert!(dir.is_dir(), "{dir} is not a directory");
        assert_eq!(dir.read_dir()?.count(), 0, "{dir} is not empty");
    }

    assert_eq!(
        std::fs::read_to_string(git_dir.join("description"))?,
        "Unnamed repository; edit this file 'description' to name the repository.\n"
    );
    assert_eq!(
        std::fs::read_to_string(git_dir.join("HEAD"))?,
        "ref: refs/heads/master\n"
    );
    assert_eq!(
        std::fs::read_to_string(git_dir.join("config"))?,
        "[core]\nrepositoryformatversion = 0\nfilemode = false\nbare = false\n\n"
    );

    assert_eq!(repo.config().format_version(), Some("0"));
    assert!(!repo.config().filemode());
    assert!(!repo.config().bare());
    Ok(())
}

#[test]
fn init_creates_missing_worktree() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    let worktree = root.join("a/b/c");

    Repo::init(&worktree)?;
    assert!(worktree.join(".git/objects").is_dir());
    Ok(())
}

#[test]
/// An existing but empty `.git` is fine to initialise into.
fn init_into_empty_git_dir() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    std::fs::create_dir(root.join(".git"))?;

    Repo::init(&root)?;
    assert!(root.join(".git/HEAD").is_file());
    Ok(())
}

#[test]
/// Files in the worktree itself don't matter, only the contents of `.git`.
fn init_non_empty_worktree() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    crate::create_test_files!(root, ["file1", "dir/file2"]);

    Repo::init(&root)?;
    assert!(root.join(".git/config").is_file());
    Ok(())
}

#[test]
fn init_twice_is_target_not_empty() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;

    let err = Repo::init(&root).unwrap_err();
    assert_eq!(err.operation(), Operation::Init);
    assert!(
        matches!(err.kind(), ErrorKind::TargetNotEmpty { path } if *path == root.join(".git")),
        "{err:?}"
    );
    Ok(())
}

#[test]
fn init_on_file_is_target_not_directory() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    let file = root.join("file1");
    crate::create_test_files!(root, ["file1"]);

    let err = Repo::init(&file).unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::TargetNotDirectory { path } if *path == file),
        "{err:?}"
    );
    Ok(())
}

#[test]
fn init_with_git_file_is_not_a_directory() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    std::fs::write(root.join(".git"), "gitdir: elsewhere\n")?;

    let err = Repo::init(&root).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotADirectory { .. }), "{err:?}");
    Ok(())
}

#[test]
fn open_after_init() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;

    let repo = Repo::open(&root)?;
    assert_eq!(repo.config(), &Config::initial());
    Ok(())
}

#[test]
fn open_without_repo() -> TestResult {
    let (_tmp, root) = scratch_dir()?;

    let err = Repo::open(&root).unwrap_err();
    assert_eq!(err.operation(), Operation::Open);
    assert!(matches!(err.kind(), ErrorKind::NoStoreFound { .. }), "{err:?}");
    Ok(())
}

#[test]
fn open_without_config() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;
    std::fs::remove_file(root.join(".git/config"))?;

    let err = Repo::open(&root).unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::ConfigMissing { path } if *path == root.join(".git/config")),
        "{err:?}"
    );
    Ok(())
}

#[test]
fn open_unsupported_version() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;
    std::fs::write(
        root.join(".git/config"),
        "[core]\n\trepositoryformatversion = 1\n\tbare = false\n",
    )?;

    let err = Repo::open(&root).unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::UnsupportedFormatVersion { version, .. } if version == "1"),
        "{err:?}"
    );
    Ok(())
}

#[test]
/// The format version is a number, however it is spelt.
fn open_version_is_numeric() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;

    for version in ["00", "+0", "-0", " 0"] {
        std::fs::write(
            root.join(".git/config"),
            format!("[core]\n\trepositoryformatversion = {version}\n"),
        )?;
        Repo::open(&root)?;
    }

    for version in ["zero", "0.0", "01", ""] {
        std::fs::write(
            root.join(".git/config"),
            format!("[core]\n\trepositoryformatversion = {version}\n"),
        )?;
        let err = Repo::open(&root).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::UnsupportedFormatVersion { .. }),
            "{version:?}: {err:?}"
        );
    }
    Ok(())
}

#[test]
/// A config with remote and branch sections, as git leaves it after a clone.
fn open_config_with_subsections() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;
    std::fs::write(
        root.join(".git/config"),
        "[core]\n\trepositoryformatversion = 0\n\tbare = false\n\
         [remote \"origin\"]\n\turl = https://example.com/repo.git\n\
         [branch \"master\"]\n\tremote = origin\n",
    )?;

    let repo = Repo::discover(&root, true)?.ok_or("repository not found")?;
    assert_eq!(repo.config().format_version(), Some("0"));
    assert_eq!(
        repo.config().get_subsection("remote", "origin", "url"),
        Some("https://example.com/repo.git")
    );
    assert_eq!(
        repo.config().get_subsection("branch", "master", "remote"),
        Some("origin")
    );
    Ok(())
}

#[test]
fn open_invalid_config() -> TestResult {
    let (_tmp, root) = scratch_dir()?;
    Repo::init(&root)?;

    std::fs::write(root.join(".git/config"), "this is not ini\n")?;
    let err = Repo::open(&root).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidConfig { .. }), "{err:?}");

    std::fs::write(root.join(".git/config"), "[core]\n\tbare = false\n")?;
    let err = Repo::open(&root).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidConfig { .. }), "{err:?}");
    Ok(())
}
