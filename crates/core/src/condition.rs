//! The condition record and its field names.
//!
//! A [`Condition`] is the candidate handed to the validator. Every attribute the validator
//! requires is an `Option` so that an incomplete submission can still be represented and
//! reported on field by field.

use chrono::{DateTime, NaiveDate, Utc};
use conditionlist_types::{ConditionStatus, NonEmptyText};
use conditionlist_uuid::RecordUuid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concept from the clinical dictionary.
///
/// Concepts are identified by uuid alone. The display name is informational and does not take
/// part in equality.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uuid: RecordUuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NonEmptyText>,
}

impl Concept {
    pub fn new(uuid: RecordUuid) -> Self {
        Self { uuid, name: None }
    }

    pub fn named(uuid: RecordUuid, name: NonEmptyText) -> Self {
        Self {
            uuid,
            name: Some(name),
        }
    }
}

impl PartialEq for Concept {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

/// A clinical condition on a patient's problem list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<RecordUuid>,

    /// Uuid of the patient the condition belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<RecordUuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConditionStatus>,

    /// Coded concept. Non-coded conditions point at the configured non-coded concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<Concept>,

    /// Free-text name used when no coded concept fits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_non_coded: Option<String>,

    /// Uuid of the user who recorded the condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<RecordUuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_detail: Option<NonEmptyText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<Concept>,

    /// The condition this one supersedes, when a condition is edited by re-entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_condition_uuid: Option<RecordUuid>,

    #[serde(default)]
    pub voided: bool,
}

impl Condition {
    /// The non-coded description, if it has any visible content.
    ///
    /// Whether a description is present at all is `condition_non_coded.is_some()`; this
    /// accessor additionally filters out blank text.
    pub fn non_coded_text(&self) -> Option<&str> {
        self.condition_non_coded
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn concept_uuid(&self) -> Option<&RecordUuid> {
        self.concept.as_ref().map(|concept| &concept.uuid)
    }

    /// Returns true when `field` holds a value.
    pub fn has_value(&self, field: ConditionField) -> bool {
        match field {
            ConditionField::Patient => self.patient.is_some(),
            ConditionField::Status => self.status.is_some(),
            ConditionField::Creator => self.creator.is_some(),
            ConditionField::Concept => self.concept.is_some(),
            ConditionField::DateCreated => self.date_created.is_some(),
            ConditionField::Uuid => self.uuid.is_some(),
            ConditionField::ConditionNonCoded => self.non_coded_text().is_some(),
        }
    }

    /// True when both conditions carry the same uuid.
    ///
    /// A condition without a uuid is never the same record as anything else.
    pub fn is_same_record(&self, other: &Condition) -> bool {
        match (&self.uuid, &other.uuid) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Names of the condition attributes a violation can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionField {
    Patient,
    Status,
    Creator,
    Concept,
    DateCreated,
    Uuid,
    ConditionNonCoded,
}

impl ConditionField {
    /// Attributes every persisted condition must carry, in reporting order.
    pub const REQUIRED: [ConditionField; 6] = [
        ConditionField::Patient,
        ConditionField::Status,
        ConditionField::Creator,
        ConditionField::Concept,
        ConditionField::DateCreated,
        ConditionField::Uuid,
    ];

    /// Property name as used on the wire and in error binding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Status => "status",
            Self::Creator => "creator",
            Self::Concept => "concept",
            Self::DateCreated => "dateCreated",
            Self::Uuid => "uuid",
            Self::ConditionNonCoded => "conditionNonCoded",
        }
    }
}

impl fmt::Display for ConditionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordUuid {
        RecordUuid::parse(s).unwrap()
    }

    #[test]
    fn test_concept_equality_ignores_name() {
        let plain = Concept::new(id("C1"));
        let named = Concept::named(id("C1"), NonEmptyText::new("Fever").unwrap());
        assert_eq!(plain, named);
        assert_ne!(plain, Concept::new(id("C2")));
    }

    #[test]
    fn test_non_coded_text_treats_blank_as_absent() {
        let mut condition = Condition::default();
        assert!(condition.non_coded_text().is_none());

        condition.condition_non_coded = Some("   ".into());
        assert!(condition.non_coded_text().is_none());
        assert!(!condition.has_value(ConditionField::ConditionNonCoded));

        condition.condition_non_coded = Some(" Fever ".into());
        assert_eq!(condition.non_coded_text(), Some(" Fever "));
    }

    #[test]
    fn test_has_value_tracks_each_required_field() {
        let empty = Condition::default();
        for field in ConditionField::REQUIRED {
            assert!(!empty.has_value(field), "{field} should be empty");
        }

        let full = Condition {
            uuid: Some(id("U1")),
            patient: Some(id("P1")),
            status: Some(ConditionStatus::Active),
            concept: Some(Concept::new(id("C1"))),
            creator: Some(id("USR1")),
            date_created: Some(Utc::now()),
            ..Default::default()
        };
        for field in ConditionField::REQUIRED {
            assert!(full.has_value(field), "{field} should be set");
        }
    }

    #[test]
    fn test_is_same_record_requires_both_uuids() {
        let a = Condition {
            uuid: Some(id("U1")),
            ..Default::default()
        };
        let b = Condition {
            uuid: Some(id("U1")),
            ..Default::default()
        };
        let anonymous = Condition::default();

        assert!(a.is_same_record(&b));
        assert!(!a.is_same_record(&anonymous));
        assert!(!anonymous.is_same_record(&Condition::default()));
    }

    #[test]
    fn test_deserialize_uses_camel_case_names() {
        let json = r#"{
            "uuid": "U1",
            "patient": "P1",
            "status": "ACTIVE",
            "concept": { "uuid": "C1", "name": "Non-coded" },
            "conditionNonCoded": "Fever",
            "creator": "USR1",
            "dateCreated": "2024-03-01T10:00:00Z",
            "onsetDate": "2024-02-27"
        }"#;
        let condition: Condition = serde_json::from_str(json).unwrap();

        assert_eq!(condition.uuid, Some(id("U1")));
        assert_eq!(condition.status, Some(ConditionStatus::Active));
        assert_eq!(condition.non_coded_text(), Some("Fever"));
        assert_eq!(
            condition.onset_date,
            NaiveDate::from_ymd_opt(2024, 2, 27)
        );
        assert!(!condition.voided);
    }

    #[test]
    fn test_field_names_match_wire_names() {
        assert_eq!(ConditionField::DateCreated.to_string(), "dateCreated");
        assert_eq!(
            ConditionField::ConditionNonCoded.as_str(),
            "conditionNonCoded"
        );
    }
}
