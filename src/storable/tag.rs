use super::{DecodeError, ObjectKind, Storable};

/// An annotated tag, stored as its raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    data: Vec<u8>,
}

impl Storable for Tag {
    const KIND: ObjectKind = ObjectKind::Tag;

    fn serialize(&self) -> &[u8] {
        &self.data
    }

    fn deserialize(payload: Vec<u8>) -> Result<Self, DecodeError> {
        Ok(Self { data: payload })
    }
}
