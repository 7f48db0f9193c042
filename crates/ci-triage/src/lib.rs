//! CI Failure Triage Library
//!
//! Decides what an autonomous maintenance agent does next when a CI run on
//! a pull request fails:
//! - Failure signatures: order-independent, secret-redacted fingerprints so
//!   a repeated failure is recognized across runs
//! - Classification: `infra`, `flake-suspected`, or `regression`, each with a
//!   stable reason code
//! - Action selection: `resume`, `spawn`, or `quarantine`
//! - Execution planning: attempt-budget check plus a versioned, persistable
//!   decision record
//!
//! Everything here is pure and synchronous. Fetching CI state, posting
//! comments, and running sessions belong to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ci_triage::{TaskState, TriageEngine};
//!
//! let engine = TriageEngine::with_config(TriageConfig::from_env()?);
//! let plan = engine.evaluate(&observation, &TaskState::first_attempt(true))?;
//! if plan.attempt_allowed {
//!     route(plan.decision.action);
//! }
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod comment;
pub mod config;
pub mod engine;
pub mod error;
pub mod observation;
pub mod signature;
pub mod triage;

pub use comment::{comment_marker, render_debug_comment, upsert_target, ExistingComment, UpsertTarget};
pub use config::{TriageConfig, TriageConfigOverrides};
pub use engine::{TaskState, TriageEngine};
pub use error::{TriageError, TriageResult};
pub use observation::{CiFailureEntry, CiRunObservation};

// Re-export signature types
pub use signature::{build_signature, FailureSignature, SignatureVersion, MAX_EXCERPT_CHARS};

// Re-export decision engine types
pub use triage::{
    classify, plan, select_action, Action, ActionOutcome, ActionReason, Classification,
    ClassificationOutcome, ClassificationReason, ExecutionPlan, TriageContext, TriageDecision,
    TriageRecord, CLASSIFIER_VERSION, DECISION_VERSION, RECORD_VERSION,
};
