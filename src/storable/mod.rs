pub mod blob;
pub mod commit;
pub mod tag;
pub mod tree;

use std::fmt::Display;
use std::str::FromStr;

use crate::digest::Digest;

use self::blob::Blob;
use self::commit::Commit;
use self::tag::Tag;
use self::tree::Tree;

/// Errors produced while decoding an object from its canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    Malformed(String),

    #[error("unknown object type {0:?}")]
    UnknownType(String),
}

/// A kind of object that can live in the database.
pub trait Storable: Sized {
    const KIND: ObjectKind;

    /// The payload, without the `"{type} {len}\0"` header.
    fn serialize(&self) -> &[u8];

    /// Build the object from a payload read out of the database.
    fn deserialize(payload: Vec<u8>) -> Result<Self, DecodeError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [Self::Blob, Self::Tree, Self::Commit, Self::Tag];

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
            ObjectKind::Tag => "tag",
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ObjectKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| DecodeError::UnknownType(s.to_owned()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Construct an object of `kind` from its payload.
    pub fn new(kind: ObjectKind, payload: Vec<u8>) -> Result<Self, DecodeError> {
        Ok(match kind {
            ObjectKind::Blob => Self::Blob(Blob::deserialize(payload)?),
            ObjectKind::Tree => Self::Tree(Tree::deserialize(payload)?),
            ObjectKind::Commit => Self::Commit(Commit::deserialize(payload)?),
            ObjectKind::Tag => Self::Tag(Tag::deserialize(payload)?),
        })
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob(_) => Blob::KIND,
            Object::Tree(_) => Tree::KIND,
            Object::Commit(_) => Commit::KIND,
            Object::Tag(_) => Tag::KIND,
        }
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            Object::Blob(x) => x.serialize(),
            Object::Tree(x) => x.serialize(),
            Object::Commit(x) => x.serialize(),
            Object::Tag(x) => x.serialize(),
        }
    }

    /// Returns the object formatted `"{type} {len}\0{data}"`.
    /// e.g.
    /// a blob `"hello\n"` becomes `"blob 6\0hello\n"`
    pub fn format(&self) -> Vec<u8> {
        let payload = self.payload();
        let len = payload.len().to_string();
        let label = self.kind().label();

        let mut formatted = Vec::with_capacity(label.len() + len.len() + 2 + payload.len());
        formatted.extend_from_slice(label.as_bytes());
        formatted.push(b' ');
        formatted.extend_from_slice(len.as_bytes());
        formatted.push(b'\0');
        formatted.extend_from_slice(payload);
        formatted
    }

    /// The object id: the SHA-1 of the formatted object.
    pub fn oid(&self) -> Digest {
        Digest::new(&self.format())
    }

    /// Parse a decompressed object.
    ///
    /// The header length must match the number of bytes following the `'\0'` exactly.
    pub fn parse(mut bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let space_idx = memchr::memchr(b' ', &bytes)
            .ok_or_else(|| DecodeError::Malformed("missing space after type".to_owned()))?;
        let nul_idx = memchr::memchr(b'\0', &bytes[space_idx + 1..])
            .map(|idx| idx + space_idx + 1)
            .ok_or_else(|| DecodeError::Malformed("missing NUL after length".to_owned()))?;

        let len = &bytes[space_idx + 1..nul_idx];
        let len = std::str::from_utf8(len)
            .ok()
            .filter(|len| !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|len| len.parse::<usize>().ok())
            .ok_or_else(|| {
                DecodeError::Malformed(format!(
                    "invalid length {:?}",
                    String::from_utf8_lossy(len)
                ))
            })?;

        let content_start = nul_idx + 1;
        let actual = bytes.len() - content_start;
        if len != actual {
            return Err(DecodeError::Malformed(format!(
                "bad length: header says {len}, found {actual}"
            )));
        }

        let kind = &bytes[..space_idx];
        let kind = std::str::from_utf8(kind)
            .map_err(|_| DecodeError::UnknownType(String::from_utf8_lossy(kind).into_owned()))?
            .parse::<ObjectKind>()?;

        bytes.drain(..content_start);
        Self::new(kind, bytes)
    }

    pub fn into_blob(self) -> Option<Blob> {
        if let Self::Blob(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}
