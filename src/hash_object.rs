use camino::Utf8Path;
use color_eyre::eyre::Context;
use color_eyre::Result;

use kettle::{write_object, Digest, Object, ObjectKind, Repo};

/// Hash the contents of `path` as an object of `kind`, storing it if `repo` is given.
pub fn handle(repo: Option<&Repo>, kind: ObjectKind, path: &Utf8Path) -> Result<Digest> {
    let data = std::fs::read(path).wrap_err_with(|| format!("Cannot read '{path}'"))?;
    let object = Object::new(kind, data)?;
    Ok(write_object(&object, repo)?)
}
