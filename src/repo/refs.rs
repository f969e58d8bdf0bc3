impl super::Repo {
    /// Resolve a user-supplied name to an object id.
    ///
    /// Only full object ids are understood for now, so `name` is returned unchanged. Short ids,
    /// branch names and tags will be resolved here.
    pub fn resolve_ref<'a>(&self, name: &'a str) -> &'a str {
        name
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8Path;
    use tempdir::TempDir;

    use crate::repo::Repo;

    #[test]
    fn test_resolve_ref_passes_through() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new("")?;
        let repo = Repo::init(Utf8Path::from_path(tmp.path()).ok_or("non-utf8 tempdir")?)?;

        for name in ["95d09f2b10159347eece71399a7e2e907ea3df4f", "master", "HEAD", "v1.0"] {
            assert_eq!(repo.resolve_ref(name), name);
        }
        Ok(())
    }
}
