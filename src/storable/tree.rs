use super::{DecodeError, ObjectKind, Storable};

/// A directory listing.
///
/// Entries are not parsed yet; the payload is kept exactly as it was stored so that it hashes
/// back to the same id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    data: Vec<u8>,
}

impl Storable for Tree {
    const KIND: ObjectKind = ObjectKind::Tree;

    fn serialize(&self) -> &[u8] {
        &self.data
    }

    fn deserialize(payload: Vec<u8>) -> Result<Self, DecodeError> {
        Ok(Self { data: payload })
    }
}
