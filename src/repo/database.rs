use crate::digest::Digest;
use crate::error::{During, ErrorKind, Operation};
use crate::storable::Object;
use crate::util;
use crate::Result;

use std::io::Read;
use std::io::Write;

use camino::Utf8PathBuf;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::*;

use super::git_dir::GitDir;
use super::Repo;

/// The loose object store under `.git/objects`.
#[derive(Debug)]
pub struct Database {
    git_dir: GitDir,
}

/// Hash `object`, and store it in `repo` if one is given.
///
/// Without a repository this only computes the object id.
pub fn write_object(object: &Object, repo: Option<&Repo>) -> Result<Digest> {
    match repo {
        Some(repo) => repo.database().store(object),
        None => Ok(object.oid()),
    }
}

impl Database {
    pub fn new(git_dir: GitDir) -> Self {
        Self { git_dir }
    }

    /// Store `obj`, returning its id.
    ///
    /// If an object with the same id is already present it is not rewritten, nor is its content
    /// compared against `obj`: equal ids mean equal content.
    pub fn store(&self, obj: &Object) -> Result<Digest> {
        let content = obj.format();
        let oid = Digest::new(&content);
        self.write_object(&content, &oid)
            .during(Operation::WriteObject)?;
        Ok(oid)
    }

    fn write_object(&self, content: &[u8], oid: &Digest) -> Result<(), ErrorKind> {
        let (prefix, suffix) = oid.split_path();
        let object_path = self
            .git_dir
            .file(&["objects", &prefix, &suffix], true)?
            .unwrap_or_else(|| self.object_path(oid));

        if object_path.exists() {
            trace!(%oid, "Object already in database");
            return Ok(());
        }

        trace!(%oid, "Writing object to database");
        let dirname = self.git_dir.path(&["objects", &prefix]);
        let temp_path = dirname.join(util::tmp_file_name());

        let mut e = ZlibEncoder::new(Vec::with_capacity(content.len()), Compression::default());
        e.write_all(content).map_err(ErrorKind::io(&object_path))?;
        let compressed_bytes = e.finish().map_err(ErrorKind::io(&object_path))?;

        std::fs::write(&temp_path, compressed_bytes).map_err(ErrorKind::io(&temp_path))?;

        if let Err(e) = std::fs::rename(&temp_path, &object_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(ErrorKind::io(&object_path)(e));
        }

        Ok(())
    }

    /// The path an object is stored at: `objects/<2 hex>/<38 hex>`.
    pub fn object_path(&self, oid: &Digest) -> Utf8PathBuf {
        let (prefix, suffix) = oid.split_path();
        self.git_dir.path(&["objects", &prefix, &suffix])
    }

    pub fn exists(&self, oid: &Digest) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read an object from the database. A missing object is `Ok(None)`.
    pub fn read(&self, oid: &Digest) -> Result<Option<Object>> {
        self.read_object(oid).during(Operation::ReadObject)
    }

    /// Like [`Database::read`], but a missing object is an error.
    pub fn load(&self, oid: &Digest) -> Result<Object> {
        self.read_object(oid)
            .and_then(|obj| obj.ok_or_else(|| ErrorKind::ObjectNotFound { oid: oid.clone() }))
            .during(Operation::ReadObject)
    }

    fn read_object(&self, oid: &Digest) -> Result<Option<Object>, ErrorKind> {
        let (prefix, suffix) = oid.split_path();
        let object_path = match self.git_dir.file(&["objects", &prefix, &suffix], false)? {
            Some(path) if path.is_file() => path,
            _ => {
                trace!(%oid, "Object not in database");
                return Ok(None);
            }
        };

        trace!(%oid, "Reading object from database");
        let compressed = std::fs::read(&object_path).map_err(ErrorKind::io(&object_path))?;

        let mut decompressed = Vec::new();
        ZlibDecoder::new(&*compressed)
            .read_to_end(&mut decompressed)
            .map_err(|e| ErrorKind::MalformedObject {
                oid: oid.clone(),
                reason: format!("cannot inflate: {e}"),
            })?;

        Object::parse(decompressed)
            .map(Some)
            .map_err(|e| ErrorKind::decode(oid, e))
    }
}
