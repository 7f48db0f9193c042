//! CI run observations — the already-extracted failure data the engine consumes.

use serde::{Deserialize, Serialize};

/// One failing check from a CI run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiFailureEntry {
    /// Check or job name.
    pub name: String,
    /// Platform-reported terminal state (e.g. `FAILURE`, `TIMED_OUT`).
    pub raw_state: String,
    /// Snippet of failure log output, if the provider returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl CiFailureEntry {
    pub fn new(name: impl Into<String>, raw_state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_state: raw_state.into(),
            excerpt: None,
        }
    }

    /// Attach a log excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Excerpt text, absent treated as empty.
    pub fn excerpt_or_empty(&self) -> &str {
        self.excerpt.as_deref().unwrap_or("")
    }
}

/// Outcome of a single CI run.
///
/// `failures` is treated as an unordered set: nothing downstream may depend
/// on its order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiRunObservation {
    /// Whether the run as a whole hit its timeout.
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub failures: Vec<CiFailureEntry>,
    /// Commands that were run, in order. Evidence only; not signature input.
    #[serde(default)]
    pub commands: Vec<String>,
}

impl CiRunObservation {
    pub fn new(timed_out: bool, failures: Vec<CiFailureEntry>) -> Self {
        Self {
            timed_out,
            failures,
            commands: Vec::new(),
        }
    }

    pub fn with_commands(mut self, commands: Vec<String>) -> Self {
        self.commands = commands;
        self
    }

    /// Iterate over present excerpts.
    pub fn excerpts(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().filter_map(|f| f.excerpt.as_deref())
    }

    /// True when nothing failed and nothing timed out.
    pub fn is_clean(&self) -> bool {
        !self.timed_out && self.failures.is_empty()
    }
}
