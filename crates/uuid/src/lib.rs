//! Record identifier utilities.
//!
//! Every persisted record in the condition list (conditions, patients, users, concepts) is
//! addressed by a short opaque identifier. Most are RFC 4122 UUIDs in hyphenated form, but
//! legacy dictionaries also ship identifiers such as `5089AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA`, so
//! the accepted syntax is deliberately wider than a UUID:
//!
//! - Length: 1 to 38 characters
//! - Characters: ASCII alphanumerics and `-`
//!
//! Identifiers compare by exact text. `abc` and `ABC` are different records.
//!
//! This module provides [`RecordUuid`], a wrapper that guarantees the syntax once constructed.

mod service;

pub use service::{RecordUuid, Uuid, MAX_RECORD_UUID_LEN};

/// Why an identifier was rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UuidError {
    #[error("record uuid cannot be empty")]
    Empty,
    #[error("record uuid is {len} characters long, at most {MAX_RECORD_UUID_LEN} allowed")]
    TooLong { len: usize },
    #[error("record uuid '{0}' may only contain ASCII letters, digits and '-'")]
    InvalidCharacter(String),
}

pub type UuidResult<T> = Result<T, UuidError>;
