use std::io::Write;
use std::str::FromStr;

use color_eyre::eyre::{bail, Context};
use color_eyre::Result;

use kettle::{Digest, Object, ObjectKind, Repo};

/// Print the payload of the object `name` to `out`, which must be of type `kind`.
pub fn handle(repo: &Repo, kind: ObjectKind, name: &str, mut out: impl Write) -> Result<()> {
    let oid = Digest::from_str(repo.resolve_ref(name))
        .wrap_err_with(|| format!("Not a valid object name: {name}"))?;

    let object = repo.database().load(&oid)?;
    if object.kind() != kind {
        bail!("Object {oid} is a {}, not a {kind}", object.kind());
    }

    match object {
        Object::Blob(blob) => blob.pretty_print(&mut out)?,
        other => {
            out.write_all(other.payload())?;
            out.flush()?;
        }
    }
    Ok(())
}
