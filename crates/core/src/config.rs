//! Global property access.
//!
//! Validation reads a small amount of system-wide configuration (currently only the uuid of
//! the non-coded concept). It reaches that configuration through the [`GlobalProperties`] port
//! rather than a process global, so callers decide where properties come from and tests can
//! pin them.

use crate::constants::GLOBAL_PROPERTY_NON_CODED_UUID;
use crate::ConditionResult;
use conditionlist_types::NonEmptyText;
use conditionlist_uuid::RecordUuid;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// Read-only source of named configuration values.
pub trait GlobalProperties: Send + Sync {
    /// Current value of the property `name`, or `None` when it is unset.
    fn global_property(&self, name: &str) -> Option<String>;
}

/// In-memory [`GlobalProperties`] that can be updated while shared.
///
/// Blank values are stored as unset.
#[derive(Debug, Default)]
pub struct GlobalPropertyStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl GlobalPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with only the non-coded concept uuid configured.
    pub fn with_non_coded_uuid(uuid: &RecordUuid) -> Self {
        let store = Self::new();
        store.insert(GLOBAL_PROPERTY_NON_CODED_UUID, uuid.as_str());
        store
    }

    /// Set `name` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `ConditionError::Text` if `name` is blank.
    pub fn set(&self, name: &str, value: &str) -> ConditionResult<()> {
        let name = NonEmptyText::new(name)?;
        self.insert(name.as_str(), value);
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    fn insert(&self, name: &str, value: &str) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        match NonEmptyText::new_optional(value) {
            Some(value) => {
                values.insert(name.to_owned(), value.into_inner());
            }
            None => {
                values.remove(name);
            }
        }
    }
}

impl GlobalProperties for GlobalPropertyStore {
    fn global_property(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

/// Parse the non-coded concept uuid from an optional environment value.
///
/// `None` or an empty/whitespace value leaves the property unset.
pub fn non_coded_uuid_from_env_value(value: Option<String>) -> ConditionResult<Option<RecordUuid>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    Ok(value.map(|v| RecordUuid::parse(&v)).transpose()?)
}
