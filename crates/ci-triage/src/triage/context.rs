//! Caller-supplied decision inputs.

use crate::error::{TriageError, TriageResult};
use crate::signature::SignatureVersion;
use serde::{Deserialize, Serialize};

/// Everything the action selector and planner need beyond the observation.
///
/// The caller owns this state across attempts (prior signature, attempt
/// counter, session existence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageContext {
    /// 1-based attempt number.
    pub attempt: u32,
    /// Budget ceiling.
    pub max_attempts: u32,
    /// A live coding session exists for this task.
    pub has_session: bool,
    /// This run's fingerprint.
    pub signature: String,
    /// Previous attempt's fingerprint, if any.
    #[serde(default)]
    pub prior_signature: Option<String>,
    /// Algorithm that produced `signature`.
    pub signature_version: SignatureVersion,
}

impl TriageContext {
    /// Check the caller contract. Budget arithmetic is never coerced.
    pub fn validate(&self) -> TriageResult<()> {
        if self.attempt == 0 {
            return Err(TriageError::validation(
                "attempt",
                "must be a positive 1-based integer",
            ));
        }
        if self.max_attempts == 0 {
            return Err(TriageError::validation(
                "max_attempts",
                "must be a positive integer",
            ));
        }
        if self.signature.is_empty() {
            return Err(TriageError::validation("signature", "must not be empty"));
        }
        Ok(())
    }

    /// This run's signature equals the previous attempt's.
    ///
    /// A missing prior signature never matches, so the first attempt can
    /// never be treated as a repeat.
    pub fn is_repeated_signature(&self) -> bool {
        self.prior_signature.as_deref() == Some(self.signature.as_str())
    }

    /// `attempt > max_attempts`.
    pub fn exhausted_budget(&self) -> bool {
        self.attempt > self.max_attempts
    }
}
