//! Execution Planner — classifier + action selector + attempt budget.
//!
//! The planner only exposes `attempt_allowed`; what happens when the budget
//! is gone (force-quarantine, escalate) is the caller's policy.

use crate::error::TriageResult;
use crate::observation::CiRunObservation;
use crate::triage::action::select_action;
use crate::triage::classifier::classify;
use crate::triage::context::TriageContext;
use crate::triage::decision::TriageDecision;
use crate::triage::record::TriageRecord;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Versioned decision plus budget arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// `!exhausted_budget`.
    pub attempt_allowed: bool,
    /// `attempt > max_attempts`.
    pub exhausted_budget: bool,
    pub decision: TriageDecision,
    /// Persisted form.
    pub record: TriageRecord,
}

/// Classify the run, select an action, and wrap both with the budget check.
pub fn plan(observation: &CiRunObservation, context: &TriageContext) -> TriageResult<ExecutionPlan> {
    context.validate()?;

    let exhausted_budget = context.exhausted_budget();
    let classified = classify(observation);
    let selected = select_action(classified.classification, context);
    let decision = TriageDecision::new(classified, selected);
    let record = TriageRecord::new(
        &decision,
        context.signature.clone(),
        context.signature_version,
        context.attempt,
        context.max_attempts,
    );

    if exhausted_budget {
        warn!(
            attempt = context.attempt,
            max_attempts = context.max_attempts,
            signature = %context.signature,
            "attempt budget exhausted"
        );
    }
    info!(
        classification = %decision.classification,
        classification_reason = %decision.classification_reason,
        action = %decision.action,
        action_reason = %decision.action_reason,
        attempt = context.attempt,
        max_attempts = context.max_attempts,
        signature = %context.signature,
        "triage plan ready"
    );

    Ok(ExecutionPlan {
        attempt_allowed: !exhausted_budget,
        exhausted_budget,
        decision,
        record,
    })
}
