mod init;

use camino::{Utf8Path, Utf8PathBuf};
use tempdir::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A fresh, canonicalised scratch directory. The directory is removed when the `TempDir` drops.
pub fn scratch_dir() -> Result<(TempDir, Utf8PathBuf), Box<dyn std::error::Error>> {
    let tmp = TempDir::new("kettle")?;
    let root = Utf8Path::from_path(tmp.path())
        .ok_or("non-utf8 tempdir")?
        .canonicalize_utf8()?;
    Ok((tmp, root))
}

#[macro_export]
macro_rules! create_test_files {
    ($root:expr, [$($path:expr),*]) => {{
        use std::io::Write;
        $({
            let path = $root.join($path);
            std::fs::create_dir_all(path.parent().unwrap())?;
            writeln!(
                std::fs::File::create(&path)?,
                concat!($path, "-contents")
            )?;
        })*
    }};
}
