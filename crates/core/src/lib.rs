//! # Condition List Core
//!
//! Validation of clinical conditions before they reach the problem list.
//!
//! This crate contains:
//! - The [`Condition`] record and its field names
//! - The ports validation reads through: [`ConditionLookup`] for persisted conditions and
//!   [`GlobalProperties`] for configuration
//! - [`ConditionValidator`] and the rules it runs
//! - [`Violations`], the standard [`ViolationSink`]
//! - Loading conditions from JSON/YAML files
//!
//! **No persistence or message rendering**: saving records and turning reason codes into
//! user-facing text belong to the caller.

pub mod condition;
pub mod config;
pub mod constants;
pub mod error;
pub mod lookup;
pub mod records;
pub mod rules;
pub mod validation;
pub mod violation;

pub use condition::{Concept, Condition, ConditionField};
pub use config::{GlobalProperties, GlobalPropertyStore};
pub use error::{ConditionError, ConditionResult};
pub use lookup::{ConditionLookup, InMemoryConditionStore};
pub use rules::{ConditionRule, RuleContext};
pub use validation::ConditionValidator;
pub use violation::{ReasonCode, Violation, ViolationSink, Violations};

pub use conditionlist_types::{ConditionStatus, NonEmptyText, TextError};
pub use conditionlist_uuid::{RecordUuid, UuidError};
