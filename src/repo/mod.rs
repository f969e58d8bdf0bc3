pub mod config;
pub mod database;
pub mod git_dir;
mod refs;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::*;

use crate::error::{During, ErrorKind, Operation};
use crate::Result;

use config::Config;
use database::Database;
use git_dir::GitDir;

pub const GIT_DIR_NAME: &str = ".git";
pub const DEFAULT_BRANCH: &str = "master";
pub const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

#[derive(Debug)]
pub struct Repo {
    worktree: Utf8PathBuf,
    git_dir: GitDir,
    config: Config,
    database: Database,
}

impl Repo {
    fn from_parts(worktree: Utf8PathBuf, git_dir: GitDir, config: Config) -> Self {
        let database = Database::new(git_dir.clone());
        Self {
            worktree,
            git_dir,
            config,
            database,
        }
    }

    /// Create a new, empty repository in `worktree`, creating `worktree` if needed.
    ///
    /// Fails if `worktree` is not a directory, or if it already contains a non-empty `.git`.
    pub fn init(worktree: impl AsRef<Utf8Path>) -> Result<Self> {
        Self::create(worktree.as_ref()).during(Operation::Init)
    }

    fn create(worktree: &Utf8Path) -> Result<Self, ErrorKind> {
        trace!(path=%worktree, "Initialising repo");
        let git_dir = GitDir::new(worktree.join(GIT_DIR_NAME));

        if worktree.exists() {
            if !worktree.is_dir() {
                return Err(ErrorKind::TargetNotDirectory {
                    path: worktree.to_owned(),
                });
            }

            let root = git_dir.root();
            if root.exists() {
                if !root.is_dir() {
                    return Err(ErrorKind::NotADirectory {
                        path: root.to_owned(),
                    });
                }
                let mut entries = root.read_dir().map_err(ErrorKind::io(root))?;
                if entries.next().is_some() {
                    return Err(ErrorKind::TargetNotEmpty {
                        path: root.to_owned(),
                    });
                }
            }
        } else {
            trace!(path=%worktree, "Creating worktree");
            std::fs::create_dir_all(worktree).map_err(ErrorKind::io(worktree))?;
        }

        let dirs: [&[&str]; 4] = [
            &["branches"],
            &["objects"],
            &["refs", "tags"],
            &["refs", "heads"],
        ];
        for dir in dirs {
            git_dir.dir(dir, true)?;
        }

        let config = Config::initial();
        let config_text = config.to_string();
        let head = format!("ref: refs/heads/{DEFAULT_BRANCH}\n");
        for (name, contents) in [
            ("description", DESCRIPTION),
            ("HEAD", head.as_str()),
            ("config", config_text.as_str()),
        ] {
            let path = git_dir
                .file(&[name], true)?
                .unwrap_or_else(|| git_dir.path(&[name]));
            trace!(%path, "Writing file");
            std::fs::write(&path, contents).map_err(ErrorKind::io(&path))?;
        }

        debug!(path=%worktree, "Initialised empty repository");
        Ok(Self::from_parts(worktree.to_owned(), git_dir, config))
    }

    /// Open the repository whose worktree is `worktree`, validating its configuration.
    pub fn open(worktree: impl AsRef<Utf8Path>) -> Result<Self> {
        Self::load(worktree.as_ref().to_owned()).during(Operation::Open)
    }

    fn load(worktree: Utf8PathBuf) -> Result<Self, ErrorKind> {
        let git_dir = GitDir::new(worktree.join(GIT_DIR_NAME));
        if !git_dir.root().is_dir() {
            return Err(ErrorKind::NoStoreFound { path: worktree });
        }

        let config_path = match git_dir.file(&["config"], false)? {
            Some(path) if path.is_file() => path,
            _ => {
                return Err(ErrorKind::ConfigMissing {
                    path: git_dir.path(&["config"]),
                })
            }
        };

        let text = std::fs::read_to_string(&config_path).map_err(ErrorKind::io(&config_path))?;
        let config = Config::parse(&text).map_err(|reason| ErrorKind::InvalidConfig {
            path: config_path.clone(),
            reason,
        })?;

        let version = match config.format_version() {
            Some(version) => version,
            None => {
                return Err(ErrorKind::InvalidConfig {
                    path: config_path,
                    reason: "core.repositoryformatversion is not set".to_owned(),
                })
            }
        };
        // Compared as a number: `00` and `+0` are version 0 too.
        if version.parse::<i64>().ok() != Some(config::FORMAT_VERSION) {
            return Err(ErrorKind::UnsupportedFormatVersion {
                path: config_path,
                version: version.to_owned(),
            });
        }

        trace!(path=%worktree, "Opened repo");
        Ok(Self::from_parts(worktree, git_dir, config))
    }

    /// Find the repository containing `start` by walking up the directory tree.
    ///
    /// `start` is canonicalised first, so symlinks and `..` are resolved before the walk. If no
    /// repository is found, this is an error when `required` is set and `Ok(None)` otherwise.
    pub fn discover(start: impl AsRef<Utf8Path>, required: bool) -> Result<Option<Self>> {
        Self::find(start.as_ref(), required).during(Operation::Discover)
    }

    fn find(start: &Utf8Path, required: bool) -> Result<Option<Self>, ErrorKind> {
        let mut path = start.canonicalize_utf8().map_err(ErrorKind::io(start))?;

        loop {
            if path.join(GIT_DIR_NAME).is_dir() {
                debug!(%path, "Found repository");
                return Self::load(path).map(Some);
            }

            let parent = match path.parent() {
                Some(parent) => parent.to_owned(),
                None => break,
            };
            path = parent;
        }

        if required {
            Err(ErrorKind::NoStoreFound {
                path: start.to_owned(),
            })
        } else {
            Ok(None)
        }
    }

    pub fn worktree(&self) -> &Utf8Path {
        &self.worktree
    }

    pub fn git_dir(&self) -> &GitDir {
        &self.git_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}
