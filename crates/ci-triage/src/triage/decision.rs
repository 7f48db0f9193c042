//! Decision vocabulary: classifications, actions, reason codes, versions.
//!
//! Every enum here is closed. Reason codes are stable snake_case strings at
//! the serialization boundary and are meant for telemetry aggregation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shape version of [`TriageDecision`].
pub const DECISION_VERSION: u32 = 1;

/// Version of the classifier and action rule set.
pub const CLASSIFIER_VERSION: u32 = 1;

/// Root-cause family of a CI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Infra,
    FlakeSuspected,
    Regression,
}

impl Classification {
    pub const ALL: [Self; 3] = [Self::Infra, Self::FlakeSuspected, Self::Regression];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Infra => "infra",
            Self::FlakeSuspected => "flake-suspected",
            Self::Regression => "regression",
        }
    }

    /// Infra and flake labels claim the failure is not the code's fault.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Infra | Self::FlakeSuspected)
    }
}

/// Operational response to a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Continue the live coding session.
    Resume,
    /// Start a fresh session.
    Spawn,
    /// Park the task; stop automatic retries.
    Quarantine,
}

impl Action {
    pub const ALL: [Self; 3] = [Self::Resume, Self::Spawn, Self::Quarantine];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::Spawn => "spawn",
            Self::Quarantine => "quarantine",
        }
    }
}

/// Why a classification was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationReason {
    InfraTimeout,
    InfraNetworkError,
    FlakeTransient,
    RegressionDefault,
}

impl ClassificationReason {
    pub const ALL: [Self; 4] = [
        Self::InfraTimeout,
        Self::InfraNetworkError,
        Self::FlakeTransient,
        Self::RegressionDefault,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InfraTimeout => "infra_timeout",
            Self::InfraNetworkError => "infra_network_error",
            Self::FlakeTransient => "flake_transient",
            Self::RegressionDefault => "regression_default",
        }
    }

    /// The one classification this reason belongs to.
    pub fn classification(self) -> Classification {
        match self {
            Self::InfraTimeout | Self::InfraNetworkError => Classification::Infra,
            Self::FlakeTransient => Classification::FlakeSuspected,
            Self::RegressionDefault => Classification::Regression,
        }
    }
}

/// Why an action was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionReason {
    /// Transient label repeated with an identical signature.
    QuarantineRepeatedSignature,
    /// A live session exists; keep its context.
    ResumeHasSession,
    /// Regression with no session to continue.
    SpawnRegression,
    /// First-seen transient failure with no session to continue.
    SpawnTransientRetry,
}

impl ActionReason {
    pub const ALL: [Self; 4] = [
        Self::QuarantineRepeatedSignature,
        Self::ResumeHasSession,
        Self::SpawnRegression,
        Self::SpawnTransientRetry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuarantineRepeatedSignature => "quarantine_repeated_signature",
            Self::ResumeHasSession => "resume_has_session",
            Self::SpawnRegression => "spawn_regression",
            Self::SpawnTransientRetry => "spawn_transient_retry",
        }
    }

    /// The one action this reason belongs to.
    pub fn action(self) -> Action {
        match self {
            Self::QuarantineRepeatedSignature => Action::Quarantine,
            Self::ResumeHasSession => Action::Resume,
            Self::SpawnRegression | Self::SpawnTransientRetry => Action::Spawn,
        }
    }
}

macro_rules! impl_code {
    ($ty:ty, $label:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("unknown {}: {}", $label, s))
            }
        }
    };
}

impl_code!(Classification, "classification");
impl_code!(Action, "action");
impl_code!(ClassificationReason, "classification reason");
impl_code!(ActionReason, "action reason");

/// Classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    pub classification: Classification,
    pub classification_reason: ClassificationReason,
}

impl ClassificationOutcome {
    pub fn new(reason: ClassificationReason) -> Self {
        Self {
            classification: reason.classification(),
            classification_reason: reason,
        }
    }
}

/// Action selector output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub action_reason: ActionReason,
}

impl ActionOutcome {
    pub fn new(reason: ActionReason) -> Self {
        Self {
            action: reason.action(),
            action_reason: reason,
        }
    }
}

/// The pure triage output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub classification: Classification,
    pub classification_reason: ClassificationReason,
    pub action: Action,
    pub action_reason: ActionReason,
    /// Decision-shape version.
    pub version: u32,
    /// Rule-set version.
    pub classifier_version: u32,
}

impl TriageDecision {
    /// Combine outcomes under the current versions.
    pub fn new(classified: ClassificationOutcome, selected: ActionOutcome) -> Self {
        Self {
            classification: classified.classification,
            classification_reason: classified.classification_reason,
            action: selected.action,
            action_reason: selected.action_reason,
            version: DECISION_VERSION,
            classifier_version: CLASSIFIER_VERSION,
        }
    }
}
