//! Constants used throughout the condition list core crate.

/// Global property naming the concept that marks a condition as non-coded.
pub const GLOBAL_PROPERTY_NON_CODED_UUID: &str = "conditionList.nonCodedUuid";

/// Environment variable the CLI reads the non-coded concept uuid from.
pub const NON_CODED_UUID_ENV_VAR: &str = "CONDITION_LIST_NON_CODED_UUID";

/// Message code for a record-level error with no specific field.
pub const ERROR_GENERAL: &str = "error.general";

/// Message code for a required field that is absent.
pub const ERROR_NULL: &str = "error.null";

/// Prefix shared by all condition-specific message codes.
pub const CONDITION_ERROR_PREFIX: &str = "Condition.error.";
