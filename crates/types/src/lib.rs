//! Small validated value types shared across the condition list crates.
//!
//! - [`NonEmptyText`] for free text that must carry at least one visible character.
//! - [`ConditionStatus`] for the clinical status of a condition.

mod status;

pub use status::ConditionStatus;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("text must contain at least one non-whitespace character")]
    Empty,
    #[error("unknown condition status: '{0}'")]
    UnknownStatus(String),
}

/// Free text with at least one visible character, stored without surrounding whitespace.
///
/// Deserializing goes through [`NonEmptyText::new`], so blank input is rejected at the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// `TextError::Empty` when nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    /// Blank input becomes `None`.
    pub fn new_optional(input: impl AsRef<str>) -> Option<Self> {
        Self::new(input).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
