//! Triage configuration
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `CI_TRIAGE_MAX_ATTEMPTS` | `5` | Attempt budget ceiling per task |
//! | `CI_TRIAGE_SIGNATURE_VERSION` | `3` | Signature algorithm (`2` or `3`) |
//!
//! # Per-Run Overrides
//!
//! ```rust,ignore
//! use ci_triage::config::{TriageConfig, TriageConfigOverrides};
//!
//! let mut config = TriageConfig::from_env()?;
//! config.apply_overrides(&TriageConfigOverrides {
//!     max_attempts: Some(3),
//!     ..Default::default()
//! });
//! ```

use crate::error::{TriageError, TriageResult};
use crate::signature::SignatureVersion;
use serde::{Deserialize, Serialize};

pub const ENV_MAX_ATTEMPTS: &str = "CI_TRIAGE_MAX_ATTEMPTS";
pub const ENV_SIGNATURE_VERSION: &str = "CI_TRIAGE_SIGNATURE_VERSION";

/// Default attempt budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Engine-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Attempt budget ceiling.
    ///
    /// Env: `CI_TRIAGE_MAX_ATTEMPTS`
    pub max_attempts: u32,

    /// Signature algorithm used for new signatures.
    ///
    /// Switching versions changes every signature, so the first attempt
    /// after a switch never matches its prior.
    ///
    /// Env: `CI_TRIAGE_SIGNATURE_VERSION`
    pub signature_version: SignatureVersion,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            signature_version: SignatureVersion::LATEST,
        }
    }
}

impl TriageConfig {
    /// Read configuration from the process environment.
    ///
    /// Missing variables take defaults; malformed ones are an error.
    pub fn from_env() -> TriageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> TriageResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            let value: u32 = raw.trim().parse().map_err(|_| {
                TriageError::config(format!(
                    "{ENV_MAX_ATTEMPTS} must be a positive integer, got {raw:?}"
                ))
            })?;
            if value == 0 {
                return Err(TriageError::config(format!(
                    "{ENV_MAX_ATTEMPTS} must be a positive integer, got 0"
                )));
            }
            config.max_attempts = value;
        }

        if let Some(raw) = lookup(ENV_SIGNATURE_VERSION) {
            let parsed: u8 = raw.trim().trim_start_matches(['v', 'V']).parse().map_err(|_| {
                TriageError::config(format!("{ENV_SIGNATURE_VERSION} must be 2 or 3, got {raw:?}"))
            })?;
            config.signature_version = SignatureVersion::try_from(parsed)
                .map_err(|e| TriageError::config(format!("{ENV_SIGNATURE_VERSION}: {e}")))?;
        }

        Ok(config)
    }

    /// Apply per-run overrides. Only `Some` values are applied.
    pub fn apply_overrides(&mut self, overrides: &TriageConfigOverrides) {
        if let Some(v) = overrides.max_attempts {
            self.max_attempts = v;
        }
        if let Some(v) = overrides.signature_version {
            self.signature_version = v;
        }
    }

    /// Format as a human-readable summary line.
    pub fn summary(&self) -> String {
        format!(
            "Triage config: max_attempts={} signature={}",
            self.max_attempts, self.signature_version
        )
    }
}

/// Per-run overrides for [`TriageConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfigOverrides {
    pub max_attempts: Option<u32>,
    pub signature_version: Option<SignatureVersion>,
}

impl TriageConfigOverrides {
    /// Whether any override is set.
    pub fn has_overrides(&self) -> bool {
        self.max_attempts.is_some() || self.signature_version.is_some()
    }
}
