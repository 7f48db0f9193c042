//! Action Selector — ordered rule chain, first match wins
//!
//! ```text
//! 1. transient ∧ signature == prior   → quarantine (quarantine_repeated_signature)
//! 2. regression ∧ has_session         → resume     (resume_has_session)
//!    regression                       → spawn      (spawn_regression)
//! 3. transient ∧ has_session          → resume     (resume_has_session)
//!    transient                        → spawn      (spawn_transient_retry)
//! ```
//!
//! Rule 1 outranks session continuity: a repeated infra/flake signature is
//! quarantined even with a live session. It never fires for regressions.

use crate::triage::context::TriageContext;
use crate::triage::decision::{ActionOutcome, ActionReason, Classification};
use tracing::debug;

/// One guard in the action chain.
pub struct ActionRule {
    pub name: &'static str,
    pub matches: fn(Classification, &TriageContext) -> bool,
    pub reason: ActionReason,
}

/// Evaluated top to bottom. The last two entries together cover every input.
pub const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        name: "repeated_transient_signature",
        matches: repeated_transient,
        reason: ActionReason::QuarantineRepeatedSignature,
    },
    ActionRule {
        name: "regression_with_session",
        matches: regression_with_session,
        reason: ActionReason::ResumeHasSession,
    },
    ActionRule {
        name: "regression_without_session",
        matches: regression_without_session,
        reason: ActionReason::SpawnRegression,
    },
    // First-seen infra/flake retries the same way a regression would.
    ActionRule {
        name: "transient_with_session",
        matches: transient_with_session,
        reason: ActionReason::ResumeHasSession,
    },
    ActionRule {
        name: "transient_without_session",
        matches: transient_without_session,
        reason: ActionReason::SpawnTransientRetry,
    },
];

fn repeated_transient(classification: Classification, ctx: &TriageContext) -> bool {
    classification.is_transient() && ctx.is_repeated_signature()
}

fn regression_with_session(classification: Classification, ctx: &TriageContext) -> bool {
    classification == Classification::Regression && ctx.has_session
}

fn regression_without_session(classification: Classification, ctx: &TriageContext) -> bool {
    classification == Classification::Regression && !ctx.has_session
}

fn transient_with_session(classification: Classification, ctx: &TriageContext) -> bool {
    classification.is_transient() && ctx.has_session
}

fn transient_without_session(classification: Classification, ctx: &TriageContext) -> bool {
    classification.is_transient() && !ctx.has_session
}

/// Select the next action for a classified failure.
pub fn select_action(classification: Classification, context: &TriageContext) -> ActionOutcome {
    let rule = ACTION_RULES
        .iter()
        .find(|rule| (rule.matches)(classification, context));
    // Unreachable given the table, but keep the fallback on the session rule.
    let reason = rule.map_or(
        if context.has_session {
            ActionReason::ResumeHasSession
        } else {
            ActionReason::SpawnRegression
        },
        |r| r.reason,
    );
    debug!(
        rule = rule.map_or("fallback", |r| r.name),
        classification = %classification,
        reason = %reason,
        "selected action"
    );
    ActionOutcome::new(reason)
}
