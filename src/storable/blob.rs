use std::io::Write;

use super::{DecodeError, ObjectKind, Storable};

/// Raw, uninterpreted file contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Storable for Blob {
    const KIND: ObjectKind = ObjectKind::Blob;

    fn serialize(&self) -> &[u8] {
        &self.data
    }

    fn deserialize(payload: Vec<u8>) -> Result<Self, DecodeError> {
        Ok(Self::new(payload))
    }
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Pretty-printing a blob is simple - just dump the contents to `out`
    pub fn pretty_print(&self, mut out: impl Write) -> std::io::Result<()> {
        out.write_all(&self.data)?;
        out.flush()
    }
}
