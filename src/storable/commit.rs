use super::{DecodeError, ObjectKind, Storable};

/// A commit, stored as its raw text (`tree ...`, `parent ...`, `author ...`, message).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    data: Vec<u8>,
}

impl Storable for Commit {
    const KIND: ObjectKind = ObjectKind::Commit;

    fn serialize(&self) -> &[u8] {
        &self.data
    }

    fn deserialize(payload: Vec<u8>) -> Result<Self, DecodeError> {
        Ok(Self { data: payload })
    }
}
