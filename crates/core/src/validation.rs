//! Condition validation.
//!
//! [`ConditionValidator`] runs an ordered list of [`ConditionRule`]s against a candidate
//! condition and reports every problem it finds to a [`ViolationSink`]. It does not stop at the
//! first violation: the caller gets the full picture and decides what blocks persistence.
//!
//! The validator holds no per-call state, so a single instance can be shared across threads.

use crate::condition::{Condition, ConditionField};
use crate::config::GlobalProperties;
use crate::lookup::ConditionLookup;
use crate::rules::{default_rules, ConditionRule, RuleContext};
use crate::violation::{ReasonCode, ViolationSink, Violations};
use crate::ConditionResult;
use std::sync::Arc;

/// Validates conditions before they are saved.
#[derive(Clone)]
pub struct ConditionValidator {
    lookup: Arc<dyn ConditionLookup>,
    properties: Arc<dyn GlobalProperties>,
    rules: Arc<[Box<dyn ConditionRule>]>,
}

impl ConditionValidator {
    /// Validator with the standard rules, in order: required fields, non-coded consistency,
    /// concept immutability, duplicate non-coded conditions.
    pub fn new(lookup: Arc<dyn ConditionLookup>, properties: Arc<dyn GlobalProperties>) -> Self {
        Self::with_rules(lookup, properties, default_rules())
    }

    /// Validator running exactly `rules`, in the order given.
    pub fn with_rules(
        lookup: Arc<dyn ConditionLookup>,
        properties: Arc<dyn GlobalProperties>,
        rules: Vec<Box<dyn ConditionRule>>,
    ) -> Self {
        Self {
            lookup,
            properties,
            rules: rules.into(),
        }
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Validate `candidate`, appending any violations to `sink`.
    ///
    /// A missing candidate produces a single record-level violation and nothing else.
    ///
    /// # Errors
    ///
    /// Only a failing lookup is returned as an error. Rule violations always go to `sink`.
    pub fn validate(
        &self,
        candidate: Option<&Condition>,
        sink: &mut dyn ViolationSink,
    ) -> ConditionResult<()> {
        let mut sink = TracingSink { inner: sink };

        let Some(condition) = candidate else {
            sink.reject(ReasonCode::General);
            return Ok(());
        };

        let ctx = RuleContext {
            lookup: self.lookup.as_ref(),
            properties: self.properties.as_ref(),
        };

        for rule in self.rules.iter() {
            tracing::trace!(rule = rule.name(), "running condition rule");
            rule.check(condition, &ctx, &mut sink)?;
        }

        Ok(())
    }

    /// Validate `candidate` into a fresh [`Violations`].
    pub fn check(&self, candidate: &Condition) -> ConditionResult<Violations> {
        let mut violations = Violations::new();
        self.validate(Some(candidate), &mut violations)?;
        Ok(violations)
    }
}

/// Logs each violation before passing it on.
struct TracingSink<'a> {
    inner: &'a mut dyn ViolationSink,
}

impl ViolationSink for TracingSink<'_> {
    fn reject(&mut self, reason: ReasonCode) {
        tracing::debug!(reason = %reason, "condition rejected");
        self.inner.reject(reason);
    }

    fn reject_field(&mut self, field: ConditionField, reason: ReasonCode) {
        tracing::debug!(field = %field, reason = %reason, "condition field rejected");
        self.inner.reject_field(field, reason);
    }
}
