use std::fmt::Display;

use camino::{Utf8Path, Utf8PathBuf};

use crate::digest::Digest;
use crate::storable::DecodeError;

/// What the store was doing when an [`Error`] occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Init,
    Discover,
    Open,
    WriteObject,
    ReadObject,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operation::Init => "initialise repository",
            Operation::Discover => "discover repository",
            Operation::Open => "open repository",
            Operation::WriteObject => "write object",
            Operation::ReadObject => "read object",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to {op}")]
pub struct Error {
    op: Operation,
    #[source]
    kind: ErrorKind,
}

impl Error {
    pub fn operation(&self) -> Operation {
        self.op
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("not a directory: {path}")]
    NotADirectory { path: Utf8PathBuf },

    #[error("{path} is not a directory")]
    TargetNotDirectory { path: Utf8PathBuf },

    #[error("{path} is not empty")]
    TargetNotEmpty { path: Utf8PathBuf },

    #[error("configuration file missing: {path}")]
    ConfigMissing { path: Utf8PathBuf },

    #[error("invalid configuration file {path}: {reason}")]
    InvalidConfig { path: Utf8PathBuf, reason: String },

    #[error("unsupported repositoryformatversion {version} in {path}")]
    UnsupportedFormatVersion { path: Utf8PathBuf, version: String },

    #[error("not a git repository (or any of the parent directories): {path}")]
    NoStoreFound { path: Utf8PathBuf },

    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: Digest, reason: String },

    #[error("unknown type {kind:?} for object {oid}")]
    UnknownObjectType { oid: Digest, kind: String },

    #[error("object not found in database: {oid}")]
    ObjectNotFound { oid: Digest },

    #[error("i/o error at {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorKind {
    pub(crate) fn during(self, op: Operation) -> Error {
        Error { op, kind: self }
    }

    /// Returns a closure suitable for `map_err` on an I/O result touching `path`.
    pub(crate) fn io(path: &Utf8Path) -> impl FnOnce(std::io::Error) -> ErrorKind {
        let path = path.to_owned();
        move |source| ErrorKind::Io { path, source }
    }

    pub(crate) fn decode(oid: &Digest, err: DecodeError) -> ErrorKind {
        match err {
            DecodeError::Malformed(reason) => ErrorKind::MalformedObject {
                oid: oid.clone(),
                reason,
            },
            DecodeError::UnknownType(kind) => ErrorKind::UnknownObjectType {
                oid: oid.clone(),
                kind,
            },
        }
    }

    /// The path or object id this error is about.
    pub fn subject(&self) -> String {
        match self {
            ErrorKind::NotADirectory { path }
            | ErrorKind::TargetNotDirectory { path }
            | ErrorKind::TargetNotEmpty { path }
            | ErrorKind::ConfigMissing { path }
            | ErrorKind::InvalidConfig { path, .. }
            | ErrorKind::UnsupportedFormatVersion { path, .. }
            | ErrorKind::NoStoreFound { path }
            | ErrorKind::Io { path, .. } => path.to_string(),
            ErrorKind::MalformedObject { oid, .. }
            | ErrorKind::UnknownObjectType { oid, .. }
            | ErrorKind::ObjectNotFound { oid } => oid.to_hex(),
        }
    }
}

/// Attach the operation being attempted to an internal result.
pub(crate) trait During<T> {
    fn during(self, op: Operation) -> Result<T>;
}

impl<T> During<T> for std::result::Result<T, ErrorKind> {
    fn during(self, op: Operation) -> Result<T> {
        self.map_err(|kind| kind.during(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_operation_and_subject() {
        let err = ErrorKind::TargetNotEmpty {
            path: "/tmp/r/.git".into(),
        }
        .during(Operation::Init);

        assert_eq!(err.operation(), Operation::Init);
        assert_eq!(err.kind().subject(), "/tmp/r/.git");
        assert_eq!(err.to_string(), "failed to initialise repository");
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "/tmp/r/.git is not empty"
        );
    }

    #[test]
    fn test_decode_error_gets_oid() {
        let oid = Digest::new(b"x");
        let kind = ErrorKind::decode(&oid, DecodeError::UnknownType("blub".to_owned()));
        assert!(matches!(kind, ErrorKind::UnknownObjectType { ref kind, .. } if kind == "blub"));
        assert_eq!(kind.subject(), oid.to_hex());
    }
}
