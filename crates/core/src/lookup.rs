//! Read access to persisted conditions.
//!
//! The validator needs two queries against existing records: all conditions for a patient,
//! and the condition with a given uuid. [`ConditionLookup`] is the port; the persistence layer
//! supplies the implementation. [`InMemoryConditionStore`] serves snapshots loaded from files
//! and test fixtures.

use crate::condition::Condition;
use crate::{ConditionError, ConditionResult};
use conditionlist_uuid::RecordUuid;
use std::cmp::Reverse;
use std::sync::{PoisonError, RwLock};

/// Read-only queries over persisted conditions.
pub trait ConditionLookup: Send + Sync {
    /// Non-voided conditions recorded for `patient`. Empty if there are none.
    fn conditions_by_patient(&self, patient: &RecordUuid) -> ConditionResult<Vec<Condition>>;

    /// The condition with `uuid`, voided or not.
    fn condition_by_uuid(&self, uuid: &RecordUuid) -> ConditionResult<Option<Condition>>;
}

/// [`ConditionLookup`] over conditions held in memory.
#[derive(Debug, Default)]
pub struct InMemoryConditionStore {
    conditions: RwLock<Vec<Condition>>,
}

impl InMemoryConditionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot.
    ///
    /// # Errors
    ///
    /// Fails if any condition has no uuid. Later entries replace earlier ones with the same
    /// uuid.
    pub fn from_conditions(conditions: Vec<Condition>) -> ConditionResult<Self> {
        let store = Self::new();
        for condition in conditions {
            store.insert(condition)?;
        }
        Ok(store)
    }

    /// Add `condition`, replacing any stored condition with the same uuid.
    ///
    /// # Errors
    ///
    /// Returns `ConditionError::InvalidInput` if `condition` has no uuid.
    pub fn insert(&self, condition: Condition) -> ConditionResult<()> {
        let Some(uuid) = condition.uuid.clone() else {
            return Err(ConditionError::InvalidInput(
                "cannot store a condition without a uuid".into(),
            ));
        };

        let mut conditions = self
            .conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match conditions
            .iter_mut()
            .find(|existing| existing.uuid.as_ref() == Some(&uuid))
        {
            Some(existing) => *existing = condition,
            None => conditions.push(condition),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConditionLookup for InMemoryConditionStore {
    /// Newest `dateCreated` first; conditions without a creation date sort last.
    fn conditions_by_patient(&self, patient: &RecordUuid) -> ConditionResult<Vec<Condition>> {
        let conditions = self
            .conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut matches: Vec<Condition> = conditions
            .iter()
            .filter(|c| !c.voided && c.patient.as_ref() == Some(patient))
            .cloned()
            .collect();
        matches.sort_by_key(|c| Reverse(c.date_created));

        Ok(matches)
    }

    fn condition_by_uuid(&self, uuid: &RecordUuid) -> ConditionResult<Option<Condition>> {
        let conditions = self
            .conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(conditions
            .iter()
            .find(|c| c.uuid.as_ref() == Some(uuid))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn id(s: &str) -> RecordUuid {
        RecordUuid::parse(s).unwrap()
    }

    fn condition(uuid: &str, patient: &str, day: u32) -> Condition {
        Condition {
            uuid: Some(id(uuid)),
            patient: Some(id(patient)),
            date_created: Some(Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_conditions_by_patient_filters_and_orders_newest_first() {
        let store = InMemoryConditionStore::from_conditions(vec![
            condition("U1", "P1", 1),
            condition("U2", "P2", 2),
            condition("U3", "P1", 3),
        ])
        .unwrap();

        let found = store.conditions_by_patient(&id("P1")).unwrap();
        let uuids: Vec<_> = found.iter().filter_map(|c| c.uuid.clone()).collect();
        assert_eq!(uuids, vec![id("U3"), id("U1")]);
    }

    #[test]
    fn test_conditions_by_patient_excludes_voided() {
        let mut voided = condition("U1", "P1", 1);
        voided.voided = true;
        let store =
            InMemoryConditionStore::from_conditions(vec![voided, condition("U2", "P1", 2)])
                .unwrap();

        let found = store.conditions_by_patient(&id("P1")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].uuid, Some(id("U2")));
    }

    #[test]
    fn test_conditions_by_patient_unknown_patient_is_empty() {
        let store = InMemoryConditionStore::new();
        assert!(store.conditions_by_patient(&id("P9")).unwrap().is_empty());
    }

    #[test]
    fn test_condition_by_uuid_includes_voided() {
        let mut voided = condition("U1", "P1", 1);
        voided.voided = true;
        let store = InMemoryConditionStore::from_conditions(vec![voided]).unwrap();

        let found = store.condition_by_uuid(&id("U1")).unwrap();
        assert!(found.is_some_and(|c| c.voided));
        assert!(store.condition_by_uuid(&id("U2")).unwrap().is_none());
    }

    #[test]
    fn test_insert_replaces_same_uuid() {
        let store = InMemoryConditionStore::new();
        store.insert(condition("U1", "P1", 1)).unwrap();
        store.insert(condition("U1", "P2", 2)).unwrap();

        assert_eq!(store.len(), 1);
        let found = store.condition_by_uuid(&id("U1")).unwrap().unwrap();
        assert_eq!(found.patient, Some(id("P2")));
    }

    #[test]
    fn test_insert_rejects_condition_without_uuid() {
        let store = InMemoryConditionStore::new();
        let err = store.insert(Condition::default()).expect_err("no uuid");
        assert!(matches!(err, ConditionError::InvalidInput(msg) if msg.contains("without a uuid")));
        assert!(store.is_empty());
    }
}
