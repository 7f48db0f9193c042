//! Persisted decision envelope.
//!
//! The envelope version moves independently of the decision shape and of the
//! signature algorithm, so an old record stays readable as rules evolve.

use crate::error::{TriageError, TriageResult};
use crate::signature::SignatureVersion;
use crate::triage::decision::{
    Action, ActionReason, Classification, ClassificationReason, TriageDecision,
    CLASSIFIER_VERSION, DECISION_VERSION,
};
use serde::{Deserialize, Serialize};

/// Current envelope version.
pub const RECORD_VERSION: u32 = 2;

fn legacy_signature_version() -> SignatureVersion {
    SignatureVersion::V2
}

fn legacy_decision_version() -> u32 {
    DECISION_VERSION
}

fn legacy_classifier_version() -> u32 {
    CLASSIFIER_VERSION
}

/// Persisted form of a triage decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRecord {
    /// Envelope version.
    pub version: u32,
    /// Records predating v3 signatures carry none.
    #[serde(default = "legacy_signature_version")]
    pub signature_version: SignatureVersion,
    #[serde(default)]
    pub signature: String,
    #[serde(default = "legacy_decision_version")]
    pub decision_version: u32,
    #[serde(default = "legacy_classifier_version")]
    pub classifier_version: u32,
    pub classification: Classification,
    pub classification_reason: ClassificationReason,
    pub action: Action,
    pub action_reason: ActionReason,
    #[serde(default)]
    pub attempt: u32,
    #[serde(default)]
    pub max_attempts: u32,
}

impl TriageRecord {
    /// Wrap a decision in the current envelope.
    pub fn new(
        decision: &TriageDecision,
        signature: impl Into<String>,
        signature_version: SignatureVersion,
        attempt: u32,
        max_attempts: u32,
    ) -> Self {
        Self {
            version: RECORD_VERSION,
            signature_version,
            signature: signature.into(),
            decision_version: decision.version,
            classifier_version: decision.classifier_version,
            classification: decision.classification,
            classification_reason: decision.classification_reason,
            action: decision.action,
            action_reason: decision.action_reason,
            attempt,
            max_attempts,
        }
    }

    /// Rebuild the decision this record was made from.
    pub fn decision(&self) -> TriageDecision {
        TriageDecision {
            classification: self.classification,
            classification_reason: self.classification_reason,
            action: self.action,
            action_reason: self.action_reason,
            version: self.decision_version,
            classifier_version: self.classifier_version,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> TriageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON, refusing envelopes newer than this build and
    /// reason codes that disagree with the stored outcome.
    pub fn from_json(json: &str) -> TriageResult<Self> {
        let record: Self = serde_json::from_str(json)?;
        if record.version > RECORD_VERSION {
            return Err(TriageError::UnsupportedRecordVersion {
                found: record.version,
                supported: RECORD_VERSION,
            });
        }
        record.check_reasons()?;
        Ok(record)
    }

    fn check_reasons(&self) -> TriageResult<()> {
        if self.classification_reason.classification() != self.classification {
            return Err(TriageError::validation(
                "classification_reason",
                format!(
                    "{} implies classification {}, record says {}",
                    self.classification_reason,
                    self.classification_reason.classification(),
                    self.classification
                ),
            ));
        }
        if self.action_reason.action() != self.action {
            return Err(TriageError::validation(
                "action_reason",
                format!(
                    "{} implies action {}, record says {}",
                    self.action_reason,
                    self.action_reason.action(),
                    self.action
                ),
            ));
        }
        Ok(())
    }
}
