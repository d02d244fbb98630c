//! Internal implementation of [`RecordUuid`].

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Longest identifier accepted, matching the width of the `uuid` column in record storage.
pub const MAX_RECORD_UUID_LEN: usize = 38;

/// A validated record identifier.
///
/// # Construction
/// - [`RecordUuid::new`] generates a fresh hyphenated v4 UUID.
/// - [`RecordUuid::parse`] validates an externally supplied identifier.
///
/// Parsing never normalises: surrounding whitespace and case are preserved or rejected, never
/// rewritten, so two identifiers are the same record only if their text is identical.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordUuid(String);

impl Default for RecordUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordUuid {
    /// Generates a new identifier (lowercase hyphenated v4 UUID).
    pub fn new() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Validates and wraps an identifier string.
    ///
    /// # Errors
    ///
    /// [`UuidError`] naming the first rule `input` breaks: empty, longer than
    /// [`MAX_RECORD_UUID_LEN`], or a character outside ASCII alphanumerics and `-`.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if input.is_empty() {
            return Err(UuidError::Empty);
        }
        if input.len() > MAX_RECORD_UUID_LEN {
            return Err(UuidError::TooLong { len: input.len() });
        }
        if !Self::is_valid(input) {
            return Err(UuidError::InvalidCharacter(input.to_owned()));
        }

        Ok(Self(input.to_owned()))
    }

    /// Returns true if `input` is a syntactically valid identifier.
    pub fn is_valid(input: &str) -> bool {
        !input.is_empty()
            && input.len() <= MAX_RECORD_UUID_LEN
            && input.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for RecordUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }
}

impl fmt::Display for RecordUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordUuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordUuid::parse(s)
    }
}

impl AsRef<str> for RecordUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
