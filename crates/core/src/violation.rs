//! Violations and the sink they are reported to.
//!
//! The validator never formats messages. It reports a [`ReasonCode`], optionally scoped to a
//! [`ConditionField`], and leaves rendering to the caller.

use crate::condition::ConditionField;
use crate::constants::{CONDITION_ERROR_PREFIX, ERROR_GENERAL, ERROR_NULL};
use std::fmt;

/// Machine-readable reason for a violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    /// The record as a whole is unusable.
    General,
    /// A required attribute is absent.
    Required,
    /// A coded condition carries a non-coded description.
    NonCodedNotSupportedForCoded,
    /// A non-coded condition is missing its description.
    NonCodedNeededForNonCoded,
    /// An existing condition was re-classified under another concept.
    ConceptCannotBeUpdated,
    /// Another condition for the patient already records the same non-coded description.
    DuplicatesNotAllowed,
}

impl ReasonCode {
    /// Short key identifying the reason, e.g. `duplicatesNotAllowed`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Required => "null",
            Self::NonCodedNotSupportedForCoded => {
                "conditionNonCodedValueNotSupportedForCodedCondition"
            }
            Self::NonCodedNeededForNonCoded => "conditionNonCodedValueNeededForNonCodedCondition",
            Self::ConceptCannotBeUpdated => "conceptsCannotBeUpdated",
            Self::DuplicatesNotAllowed => "duplicatesNotAllowed",
        }
    }

    /// Fully qualified message code for localisation lookups.
    pub fn message_code(&self) -> String {
        match self {
            Self::General => ERROR_GENERAL.to_string(),
            Self::Required => ERROR_NULL.to_string(),
            other => format!("{CONDITION_ERROR_PREFIX}{}", other.key()),
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_code())
    }
}

/// A single rejection. `field` is `None` for record-level violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Violation {
    pub field: Option<ConditionField>,
    pub reason: ReasonCode,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{field}: {}", self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Write-only destination for violations.
///
/// Implementations must keep violations in the order they were reported.
pub trait ViolationSink {
    /// Record a violation that applies to the whole record.
    fn reject(&mut self, reason: ReasonCode);

    /// Record a violation against one field.
    fn reject_field(&mut self, field: ConditionField, reason: ReasonCode);
}

/// Ordered collection of violations. The standard [`ViolationSink`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Violations {
    entries: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.entries.iter()
    }

    /// Reasons reported against `field`, in report order.
    pub fn field_errors(&self, field: ConditionField) -> Vec<ReasonCode> {
        self.entries
            .iter()
            .filter(|v| v.field == Some(field))
            .map(|v| v.reason)
            .collect()
    }

    pub fn has_field_errors(&self, field: ConditionField) -> bool {
        self.entries.iter().any(|v| v.field == Some(field))
    }

    /// Reasons reported against the record as a whole.
    pub fn global_errors(&self) -> Vec<ReasonCode> {
        self.entries
            .iter()
            .filter(|v| v.field.is_none())
            .map(|v| v.reason)
            .collect()
    }

    /// Number of violations carrying `reason`, across all fields.
    pub fn count_of(&self, reason: ReasonCode) -> usize {
        self.entries.iter().filter(|v| v.reason == reason).count()
    }
}

impl ViolationSink for Violations {
    fn reject(&mut self, reason: ReasonCode) {
        self.entries.push(Violation {
            field: None,
            reason,
        });
    }

    fn reject_field(&mut self, field: ConditionField, reason: ReasonCode) {
        self.entries.push(Violation {
            field: Some(field),
            reason,
        });
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_codes() {
        assert_eq!(ReasonCode::General.message_code(), "error.general");
        assert_eq!(ReasonCode::Required.message_code(), "error.null");
        assert_eq!(
            ReasonCode::DuplicatesNotAllowed.message_code(),
            "Condition.error.duplicatesNotAllowed"
        );
        assert_eq!(
            ReasonCode::ConceptCannotBeUpdated.to_string(),
            "Condition.error.conceptsCannotBeUpdated"
        );
    }

    #[test]
    fn test_violations_keep_report_order_and_duplicates() {
        let mut violations = Violations::new();
        violations.reject_field(ConditionField::Concept, ReasonCode::DuplicatesNotAllowed);
        violations.reject_field(ConditionField::Patient, ReasonCode::Required);
        violations.reject_field(ConditionField::Concept, ReasonCode::DuplicatesNotAllowed);

        assert_eq!(violations.len(), 3);
        assert_eq!(
            violations.field_errors(ConditionField::Concept),
            vec![
                ReasonCode::DuplicatesNotAllowed,
                ReasonCode::DuplicatesNotAllowed
            ]
        );
        assert_eq!(
            violations.iter().map(|v| v.field).collect::<Vec<_>>(),
            vec![
                Some(ConditionField::Concept),
                Some(ConditionField::Patient),
                Some(ConditionField::Concept)
            ]
        );
        assert!(violations.global_errors().is_empty());
    }

    #[test]
    fn test_global_errors_are_separate_from_field_errors() {
        let mut violations = Violations::new();
        violations.reject(ReasonCode::General);

        assert_eq!(violations.global_errors(), vec![ReasonCode::General]);
        assert!(!violations.has_field_errors(ConditionField::Concept));
        assert_eq!(violations.iter().next().unwrap().to_string(), "error.general");
    }

    #[test]
    fn test_violation_display_includes_field() {
        let violation = Violation {
            field: Some(ConditionField::ConditionNonCoded),
            reason: ReasonCode::NonCodedNeededForNonCoded,
        };
        assert_eq!(
            violation.to_string(),
            "conditionNonCoded: Condition.error.conditionNonCodedValueNeededForNonCodedCondition"
        );
    }
}
