//! Failure Classifier — ordered rule chain, first match wins
//!
//! ```text
//! 1. timed_out                       → infra           (infra_timeout)
//! 2. excerpt ~ network/transport     → infra           (infra_network_error)
//! 3. excerpt ~ flakiness marker      → flake-suspected (flake_transient)
//! 4. otherwise                       → regression      (regression_default)
//! ```
//!
//! The timeout flag is ground truth and outranks any text heuristic, so a
//! flaky-looking message inside a timed-out run is still infra.

use crate::observation::CiRunObservation;
use crate::triage::decision::{ClassificationOutcome, ClassificationReason};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static NETWORK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(connection (reset|refused|aborted|timed out)|econnreset|econnrefused|etimedout|enotfound|eai_again|could not resolve host|temporary failure in name resolution|getaddrinfo|dns (resolution|lookup) fail|socket hang up|network is unreachable|tls handshake timeout|\b50[234] (bad gateway|service unavailable|gateway time-?out))",
    )
    .expect("NETWORK_PATTERN regex should compile")
});

static FLAKE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(flaky|flakiness|\bflake\b|intermittent(ly)? fail)")
        .expect("FLAKE_PATTERN regex should compile")
});

/// One guard in the classifier chain.
pub struct ClassifierRule {
    pub name: &'static str,
    pub matches: fn(&CiRunObservation) -> bool,
    pub reason: ClassificationReason,
}

/// Evaluated top to bottom. The last rule always matches.
pub const CLASSIFIER_RULES: &[ClassifierRule] = &[
    ClassifierRule {
        name: "timed_out",
        matches: timed_out,
        reason: ClassificationReason::InfraTimeout,
    },
    ClassifierRule {
        name: "network_error",
        matches: network_error,
        reason: ClassificationReason::InfraNetworkError,
    },
    ClassifierRule {
        name: "flake_marker",
        matches: flake_marker,
        reason: ClassificationReason::FlakeTransient,
    },
    ClassifierRule {
        name: "default",
        matches: always,
        reason: ClassificationReason::RegressionDefault,
    },
];

fn timed_out(obs: &CiRunObservation) -> bool {
    obs.timed_out
}

fn network_error(obs: &CiRunObservation) -> bool {
    any_excerpt_matches(obs, &NETWORK_PATTERN)
}

fn flake_marker(obs: &CiRunObservation) -> bool {
    any_excerpt_matches(obs, &FLAKE_PATTERN)
}

fn always(_: &CiRunObservation) -> bool {
    true
}

fn any_excerpt_matches(obs: &CiRunObservation, pattern: &Regex) -> bool {
    obs.excerpts().any(|excerpt| pattern.is_match(excerpt))
}

/// Classify a run observation.
pub fn classify(observation: &CiRunObservation) -> ClassificationOutcome {
    let rule = CLASSIFIER_RULES
        .iter()
        .find(|rule| (rule.matches)(observation));
    let reason = rule.map_or(ClassificationReason::RegressionDefault, |r| r.reason);
    debug!(
        rule = rule.map_or("default", |r| r.name),
        reason = %reason,
        "classified CI run"
    );
    ClassificationOutcome::new(reason)
}
