//! Failure Signatures — content-addressed fingerprints for CI failures
//!
//! A signature lets the engine recognize "the same failure happened again"
//! across independent runs. It is a pure function of `(timed_out, failures)`:
//! the order of `failures` never matters, and `commands` is ignored.
//!
//! # Algorithm
//!
//! ```text
//! failures ─► (name, raw_state, excerpt) tuples
//!              │  v3 only: excerpt = redact(truncate(excerpt, 2000))
//!              ▼
//!          sort by (name, raw_state, excerpt)
//!              ▼
//!   "1"|"0" + RS name US raw_state US excerpt + RS ...
//!              ▼
//!          FNV-1a 32 ─► 8 lowercase hex digits
//! ```
//!
//! Both versions stay supported so signatures persisted by older attempts
//! can still be reproduced.

pub mod fnv;
pub mod redact;

use crate::error::{TriageError, TriageResult};
use crate::observation::CiRunObservation;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use fnv::{fnv1a_32, fnv1a_hex};
pub use redact::{redact_secrets, sanitize_excerpt, truncate_chars, MAX_EXCERPT_CHARS};

/// Separates fields within one failure tuple (ASCII unit separator).
const FIELD_SEPARATOR: char = '\u{1f}';

/// Separates failure tuples (ASCII record separator).
const RECORD_SEPARATOR: char = '\u{1e}';

/// Signature algorithm version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SignatureVersion {
    /// Sorted tuples, hashed as-is.
    V2,
    /// v2 plus bounded excerpt truncation and secret redaction.
    V3,
}

impl SignatureVersion {
    /// Newest algorithm; used when nothing else is configured.
    pub const LATEST: Self = Self::V3;

    pub fn as_u8(self) -> u8 {
        match self {
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }
}

impl Default for SignatureVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl TryFrom<u8> for SignatureVersion {
    type Error = TriageError;

    fn try_from(value: u8) -> TriageResult<Self> {
        match value {
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            version => Err(TriageError::UnsupportedSignatureVersion { version }),
        }
    }
}

impl From<SignatureVersion> for u8 {
    fn from(version: SignatureVersion) -> Self {
        version.as_u8()
    }
}

impl std::fmt::Display for SignatureVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.as_u8())
    }
}

/// A computed failure fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FailureSignature {
    /// 8 lowercase hex digits.
    pub signature: String,
    /// Algorithm that produced `signature`.
    pub version: SignatureVersion,
}

impl std::fmt::Display for FailureSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.version, self.signature)
    }
}

/// Build the signature for `observation` with the given algorithm version.
///
/// Total: an empty failure list yields a well-defined "no observed failure"
/// signature.
pub fn build_signature(
    observation: &CiRunObservation,
    version: SignatureVersion,
) -> FailureSignature {
    let canonical = canonical_form(observation, version);
    FailureSignature {
        signature: fnv1a_hex(&canonical),
        version,
    }
}

/// Order-independent canonical string that gets hashed.
fn canonical_form(observation: &CiRunObservation, version: SignatureVersion) -> String {
    let mut tuples: Vec<(&str, &str, Cow<'_, str>)> = observation
        .failures
        .iter()
        .map(|failure| {
            let excerpt = failure.excerpt_or_empty();
            let excerpt = match version {
                SignatureVersion::V2 => Cow::Borrowed(excerpt),
                SignatureVersion::V3 => Cow::Owned(sanitize_excerpt(excerpt)),
            };
            (failure.name.as_str(), failure.raw_state.as_str(), excerpt)
        })
        .collect();

    // Full-tuple ordering: ties on name fall back to state, then excerpt.
    tuples.sort();

    let mut out = String::from(if observation.timed_out { "1" } else { "0" });
    for (name, raw_state, excerpt) in &tuples {
        out.push(RECORD_SEPARATOR);
        out.push_str(name);
        out.push(FIELD_SEPARATOR);
        out.push_str(raw_state);
        out.push(FIELD_SEPARATOR);
        out.push_str(excerpt);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::CiFailureEntry;

    fn obs(timed_out: bool, failures: Vec<CiFailureEntry>) -> CiRunObservation {
        CiRunObservation::new(timed_out, failures)
    }

    #[test]
    fn test_empty_observation_has_defined_signature() {
        let sig = build_signature(&CiRunObservation::default(), SignatureVersion::V2);
        // FNV-1a of "0".
        assert_eq!(sig.signature, fnv1a_hex("0"));
        assert_eq!(sig.signature.len(), 8);
        assert_eq!(sig.version, SignatureVersion::V2);
    }

    #[test]
    fn test_timeout_flag_changes_signature() {
        let a = build_signature(&obs(false, vec![]), SignatureVersion::V3);
        let b = build_signature(&obs(true, vec![]), SignatureVersion::V3);
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_order_does_not_matter() {
        let x = CiFailureEntry::new("build", "FAILURE").with_excerpt("error[E0308]");
        let y = CiFailureEntry::new("test", "TIMED_OUT");
        let z = CiFailureEntry::new("build", "CANCELLED");
        for version in [SignatureVersion::V2, SignatureVersion::V3] {
            let a = build_signature(&obs(false, vec![x.clone(), y.clone(), z.clone()]), version);
            let b = build_signature(&obs(false, vec![z.clone(), x.clone(), y.clone()]), version);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_commands_are_not_signature_input() {
        let base = obs(false, vec![CiFailureEntry::new("lint", "FAILURE")]);
        let with_cmds = base.clone().with_commands(vec!["cargo clippy".into()]);
        assert_eq!(
            build_signature(&base, SignatureVersion::V3),
            build_signature(&with_cmds, SignatureVersion::V3)
        );
    }

    #[test]
    fn test_absent_and_empty_excerpt_equivalent() {
        let a = obs(false, vec![CiFailureEntry::new("lint", "FAILURE")]);
        let b = obs(false, vec![CiFailureEntry::new("lint", "FAILURE").with_excerpt("")]);
        assert_eq!(
            build_signature(&a, SignatureVersion::V2),
            build_signature(&b, SignatureVersion::V2)
        );
    }

    #[test]
    fn test_v3_collapses_distinct_secrets() {
        let a = obs(
            false,
            vec![CiFailureEntry::new("deploy", "FAILURE")
                .with_excerpt("401 with Bearer aaaaaaaaaaaaaaaaaaaa")],
        );
        let b = obs(
            false,
            vec![CiFailureEntry::new("deploy", "FAILURE")
                .with_excerpt("401 with Bearer bbbbbbbbbbbbbbbbbbbb")],
        );
        assert_eq!(
            build_signature(&a, SignatureVersion::V3),
            build_signature(&b, SignatureVersion::V3)
        );
        assert_ne!(
            build_signature(&a, SignatureVersion::V2).signature,
            build_signature(&b, SignatureVersion::V2).signature
        );
    }

    #[test]
    fn test_v3_collapses_env_style_passwords() {
        let run = |password: &str| {
            obs(
                false,
                vec![CiFailureEntry::new("migrate", "FAILURE")
                    .with_excerpt(format!("DB_PASSWORD={password} rejected"))],
            )
        };
        let a = run("hunter2hunter2");
        let b = run("correcthorse99");
        assert_eq!(
            build_signature(&a, SignatureVersion::V3),
            build_signature(&b, SignatureVersion::V3)
        );
        assert_ne!(
            build_signature(&a, SignatureVersion::V2).signature,
            build_signature(&b, SignatureVersion::V2).signature
        );
    }

    #[test]
    fn test_v3_collapses_secrets_cut_at_bound() {
        let prefix = "x".repeat(MAX_EXCERPT_CHARS - 10);
        let a = obs(
            false,
            vec![CiFailureEntry::new("deploy", "FAILURE")
                .with_excerpt(format!("{prefix} Bearer abcdefghijklmnop"))],
        );
        let b = obs(
            false,
            vec![CiFailureEntry::new("deploy", "FAILURE")
                .with_excerpt(format!("{prefix} Bearer zyxwvutsrqponmlk"))],
        );
        assert_eq!(
            build_signature(&a, SignatureVersion::V3),
            build_signature(&b, SignatureVersion::V3)
        );
    }

    #[test]
    fn test_v3_ignores_content_past_bound() {
        let prefix = "y".repeat(MAX_EXCERPT_CHARS);
        let a = obs(
            false,
            vec![CiFailureEntry::new("t", "FAILURE").with_excerpt(format!("{prefix}tail-one"))],
        );
        let b = obs(
            false,
            vec![CiFailureEntry::new("t", "FAILURE").with_excerpt(format!("{prefix}tail-two"))],
        );
        assert_eq!(
            build_signature(&a, SignatureVersion::V3),
            build_signature(&b, SignatureVersion::V3)
        );
        assert_ne!(
            build_signature(&a, SignatureVersion::V2).signature,
            build_signature(&b, SignatureVersion::V2).signature
        );
    }

    #[test]
    fn test_version_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&SignatureVersion::V3).unwrap(), "3");
        let v: SignatureVersion = serde_json::from_str("2").unwrap();
        assert_eq!(v, SignatureVersion::V2);
        assert!(serde_json::from_str::<SignatureVersion>("4").is_err());
    }

    #[test]
    fn test_try_from_rejects_unknown() {
        let err = SignatureVersion::try_from(1).unwrap_err();
        assert!(matches!(
            err,
            TriageError::UnsupportedSignatureVersion { version: 1 }
        ));
    }
}
