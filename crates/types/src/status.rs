//! Clinical status of a condition.

use crate::TextError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Where a condition sits in the patient's clinical history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionStatus {
    /// The patient currently has the condition.
    Active,
    /// The condition has resolved or is no longer being tracked.
    Inactive,
    /// A past condition recorded for history only.
    HistoryOf,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::HistoryOf => "HISTORY_OF",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionStatus {
    type Err = TextError;

    /// Parses the wire name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "HISTORY_OF" => Ok(Self::HistoryOf),
            _ => Err(TextError::UnknownStatus(s.to_string())),
        }
    }
}
