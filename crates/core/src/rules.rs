//! The individual condition rules.
//!
//! Each rule is a stateless check over one candidate. Rules that need related records or
//! configuration read them through the ports in [`RuleContext`]. Rules report problems to the
//! sink and only return `Err` when a port fails.

use crate::condition::{Condition, ConditionField};
use crate::config::GlobalProperties;
use crate::constants::GLOBAL_PROPERTY_NON_CODED_UUID;
use crate::lookup::ConditionLookup;
use crate::violation::{ReasonCode, ViolationSink};
use crate::ConditionResult;

/// Read-only collaborators available to every rule.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub lookup: &'a dyn ConditionLookup,
    pub properties: &'a dyn GlobalProperties,
}

/// One validation rule for conditions.
pub trait ConditionRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn check(
        &self,
        condition: &Condition,
        ctx: &RuleContext<'_>,
        sink: &mut dyn ViolationSink,
    ) -> ConditionResult<()>;
}

/// Rejects each configured field that has no value.
#[derive(Clone, Debug)]
pub struct RequiredFields {
    fields: Vec<ConditionField>,
}

impl RequiredFields {
    pub fn new(fields: Vec<ConditionField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ConditionField] {
        &self.fields
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        Self::new(ConditionField::REQUIRED.to_vec())
    }
}

impl ConditionRule for RequiredFields {
    fn name(&self) -> &'static str {
        "required-fields"
    }

    fn check(
        &self,
        condition: &Condition,
        _ctx: &RuleContext<'_>,
        sink: &mut dyn ViolationSink,
    ) -> ConditionResult<()> {
        for field in &self.fields {
            if !condition.has_value(*field) {
                sink.reject_field(*field, ReasonCode::Required);
            }
        }
        Ok(())
    }
}

/// A non-coded description is allowed exactly when the concept is the configured non-coded
/// concept.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonCodedConsistency;

impl ConditionRule for NonCodedConsistency {
    fn name(&self) -> &'static str {
        "non-coded-consistency"
    }

    fn check(
        &self,
        condition: &Condition,
        ctx: &RuleContext<'_>,
        sink: &mut dyn ViolationSink,
    ) -> ConditionResult<()> {
        let Some(concept_uuid) = condition.concept_uuid() else {
            return Ok(());
        };

        let non_coded_uuid = ctx.properties.global_property(GLOBAL_PROPERTY_NON_CODED_UUID);
        if non_coded_uuid.is_none() {
            tracing::warn!(
                property = GLOBAL_PROPERTY_NON_CODED_UUID,
                "non-coded concept is not configured; no concept is treated as non-coded"
            );
        }
        let is_non_coded_concept = non_coded_uuid.as_deref() == Some(concept_uuid.as_str());

        // Any description, even a blank one, marks the condition as non-coded.
        let has_description = condition.condition_non_coded.is_some();
        match (has_description, is_non_coded_concept) {
            (true, false) => sink.reject_field(
                ConditionField::ConditionNonCoded,
                ReasonCode::NonCodedNotSupportedForCoded,
            ),
            (false, true) => sink.reject_field(
                ConditionField::ConditionNonCoded,
                ReasonCode::NonCodedNeededForNonCoded,
            ),
            _ => {}
        }
        Ok(())
    }
}

/// A persisted condition keeps the concept it was created with.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConceptImmutable;

impl ConditionRule for ConceptImmutable {
    fn name(&self) -> &'static str {
        "concept-immutable"
    }

    fn check(
        &self,
        condition: &Condition,
        ctx: &RuleContext<'_>,
        sink: &mut dyn ViolationSink,
    ) -> ConditionResult<()> {
        let (Some(uuid), Some(concept)) = (&condition.uuid, &condition.concept) else {
            return Ok(());
        };

        if let Some(existing) = ctx.lookup.condition_by_uuid(uuid)? {
            if existing.concept.as_ref() != Some(concept) {
                sink.reject_field(ConditionField::Concept, ReasonCode::ConceptCannotBeUpdated);
            }
        }
        Ok(())
    }
}

/// A patient may not hold two conditions with the same concept and the same non-coded text.
///
/// Texts are compared with all ASCII whitespace removed and without regard to case. Blank
/// candidate descriptions are not checked. Every matching
/// record produces its own violation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicateNonCoded;

impl ConditionRule for NoDuplicateNonCoded {
    fn name(&self) -> &'static str {
        "no-duplicate-non-coded"
    }

    fn check(
        &self,
        condition: &Condition,
        ctx: &RuleContext<'_>,
        sink: &mut dyn ViolationSink,
    ) -> ConditionResult<()> {
        let Some(text) = condition.non_coded_text() else {
            return Ok(());
        };
        let (Some(patient), Some(concept)) = (&condition.patient, &condition.concept) else {
            return Ok(());
        };

        let wanted = normalise_non_coded(text);
        for existing in ctx.lookup.conditions_by_patient(patient)? {
            if existing.concept.as_ref() != Some(concept) {
                continue;
            }
            // Coded records have no description and can never match.
            let Some(existing_text) = existing.condition_non_coded.as_deref() else {
                continue;
            };
            if normalise_non_coded(existing_text) != wanted || existing.is_same_record(condition)
            {
                continue;
            }

            sink.reject_field(ConditionField::Concept, ReasonCode::DuplicatesNotAllowed);
        }
        Ok(())
    }
}

/// Comparison form of a non-coded description: no ASCII whitespace anywhere, lowercase.
///
/// Non-ASCII spacing such as U+00A0 is kept and takes part in the comparison.
pub fn normalise_non_coded(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The standard rule order.
pub fn default_rules() -> Vec<Box<dyn ConditionRule>> {
    vec![
        Box::new(RequiredFields::default()),
        Box::new(NonCodedConsistency),
        Box::new(ConceptImmutable),
        Box::new(NoDuplicateNonCoded),
    ]
}
