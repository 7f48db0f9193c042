//! Triage Engine — configured entry point for the reconciliation loop
//!
//! Wraps signature building and planning behind one call so the caller only
//! supplies the observation and the task's persisted state.

use crate::config::TriageConfig;
use crate::error::TriageResult;
use crate::observation::CiRunObservation;
use crate::signature::{build_signature, FailureSignature};
use crate::triage::{plan, ExecutionPlan, TriageContext};
use serde::{Deserialize, Serialize};

/// Per-task state owned by the caller across attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    /// 1-based attempt number for this run.
    pub attempt: u32,
    /// A live coding session exists for this task.
    #[serde(default)]
    pub has_session: bool,
    /// Signature persisted from the previous attempt.
    #[serde(default)]
    pub prior_signature: Option<String>,
}

impl TaskState {
    /// State for the first attempt of a task.
    pub fn first_attempt(has_session: bool) -> Self {
        Self {
            attempt: 1,
            has_session,
            prior_signature: None,
        }
    }

    /// State for the attempt after `plan`, carrying its signature forward.
    pub fn next(&self, plan: &ExecutionPlan, has_session: bool) -> Self {
        Self {
            attempt: self.attempt.saturating_add(1),
            has_session,
            prior_signature: Some(plan.record.signature.clone()),
        }
    }
}

/// The triage engine. Holds config only; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    config: TriageConfig,
}

impl TriageEngine {
    /// Create an engine with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Signature of `observation` under the configured algorithm.
    pub fn signature(&self, observation: &CiRunObservation) -> FailureSignature {
        build_signature(observation, self.config.signature_version)
    }

    /// Build the full context for one run.
    pub fn context(&self, observation: &CiRunObservation, task: &TaskState) -> TriageContext {
        let signature = self.signature(observation);
        TriageContext {
            attempt: task.attempt,
            max_attempts: self.config.max_attempts,
            has_session: task.has_session,
            signature: signature.signature,
            prior_signature: task.prior_signature.clone(),
            signature_version: signature.version,
        }
    }

    /// Sign, classify, select, and budget-check one CI run.
    pub fn evaluate(
        &self,
        observation: &CiRunObservation,
        task: &TaskState,
    ) -> TriageResult<ExecutionPlan> {
        plan(observation, &self.context(observation, task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriageConfigOverrides;
    use crate::observation::CiFailureEntry;
    use crate::signature::SignatureVersion;
    use crate::triage::{Action, ActionReason};

    fn network_failure() -> CiRunObservation {
        CiRunObservation::new(
            false,
            vec![CiFailureEntry::new("install", "FAILURE")
                .with_excerpt("npm ERR! code ECONNRESET")],
        )
    }

    #[test]
    fn test_context_uses_config() {
        let mut config = TriageConfig::default();
        config.apply_overrides(&TriageConfigOverrides {
            max_attempts: Some(3),
            signature_version: Some(SignatureVersion::V2),
        });
        let engine = TriageEngine::with_config(config);
        let ctx = engine.context(&network_failure(), &TaskState::first_attempt(false));
        assert_eq!(ctx.max_attempts, 3);
        assert_eq!(ctx.signature_version, SignatureVersion::V2);
        assert_eq!(ctx.signature.len(), 8);
        assert_eq!(ctx.prior_signature, None);
    }

    #[test]
    fn test_repeated_infra_failure_quarantines_on_second_attempt() {
        let engine = TriageEngine::new();
        let first_task = TaskState::first_attempt(true);
        let first = engine.evaluate(&network_failure(), &first_task).unwrap();
        assert_eq!(first.decision.action, Action::Resume);

        let second_task = first_task.next(&first, true);
        assert_eq!(second_task.attempt, 2);
        let second = engine.evaluate(&network_failure(), &second_task).unwrap();
        assert_eq!(second.decision.action, Action::Quarantine);
        assert_eq!(
            second.decision.action_reason,
            ActionReason::QuarantineRepeatedSignature
        );
    }

    #[test]
    fn test_zero_attempt_is_rejected() {
        let engine = TriageEngine::new();
        let err = engine
            .evaluate(&network_failure(), &TaskState::default())
            .unwrap_err();
        assert_eq!(err.field(), Some("attempt"));
    }
}
