use camino::{Utf8Path, Utf8PathBuf};
use tracing::*;

use crate::error::ErrorKind;
use crate::Result;

/// Path arithmetic under a repository's `.git` directory.
#[derive(Clone, Debug)]
pub struct GitDir {
    root: Utf8PathBuf,
}

impl GitDir {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Join `segments` onto the git directory. Touches nothing on disk.
    pub fn path(&self, segments: &[&str]) -> Utf8PathBuf {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Resolve a directory under the git directory.
    ///
    /// Returns `Ok(None)` if it does not exist and `mkdir` is false. With `mkdir` the whole
    /// chain is created; a directory that appears concurrently is not an error.
    pub fn dir(&self, segments: &[&str], mkdir: bool) -> Result<Option<Utf8PathBuf>, ErrorKind> {
        let path = self.path(segments);

        if path.exists() {
            return if path.is_dir() {
                Ok(Some(path))
            } else {
                Err(ErrorKind::NotADirectory { path })
            };
        }

        if !mkdir {
            return Ok(None);
        }

        // `exists` is also false when an ancestor is a regular file; report that ancestor
        // rather than the ENOTDIR `create_dir_all` would give.
        if let Some(blocker) = path.ancestors().skip(1).find(|p| p.is_file()) {
            return Err(ErrorKind::NotADirectory {
                path: blocker.to_owned(),
            });
        }

        trace!(%path, "Creating directory");
        std::fs::create_dir_all(&path).map_err(ErrorKind::io(&path))?;
        Ok(Some(path))
    }

    /// Resolve a file under the git directory. Everything but the last segment is treated as
    /// a directory and resolved with [`GitDir::dir`].
    pub fn file(&self, segments: &[&str], mkdir: bool) -> Result<Option<Utf8PathBuf>, ErrorKind> {
        let parent = segments.split_last().map_or(&[][..], |(_, parent)| parent);
        Ok(self
            .dir(parent, mkdir)?
            .map(|_| self.path(segments)))
    }
}
