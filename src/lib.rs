//! A content-addressed object store using the on-disk layout of git.

#[cfg(test)]
mod test;

pub mod digest;
pub mod error;
pub mod repo;
pub mod storable;
mod util;

pub use digest::Digest;
pub use error::{Error, ErrorKind, Operation, Result};
pub use repo::database::{write_object, Database};
pub use repo::Repo;
pub use storable::{Object, ObjectKind};
