//! Triage Decision Engine — deterministic classification and next action
//!
//! Pure functions only: no clock, no I/O, no shared state. Safe to call
//! concurrently for any number of repositories and pull requests.
//!
//! # Flow
//!
//! ```text
//! CiRunObservation ──► classify ──► Classification + reason
//!                                        │
//! TriageContext ─────────────────► select_action ──► Action + reason
//!        │                                                │
//!        └──────── attempt > max_attempts ──► plan ◄──────┘
//!                                              │
//!                                              ▼
//!                         ExecutionPlan { attempt_allowed, record v2 }
//! ```
//!
//! Three independent version tags travel with the output: the decision
//! shape, the classifier rule set, and the signature algorithm. The record
//! envelope carries its own fourth.

pub mod action;
pub mod classifier;
pub mod context;
pub mod decision;
pub mod planner;
pub mod record;

pub use action::{select_action, ActionRule, ACTION_RULES};
pub use classifier::{classify, ClassifierRule, CLASSIFIER_RULES};
pub use context::TriageContext;
pub use decision::{
    Action, ActionOutcome, ActionReason, Classification, ClassificationOutcome,
    ClassificationReason, TriageDecision, CLASSIFIER_VERSION, DECISION_VERSION,
};
pub use planner::{plan, ExecutionPlan};
pub use record::{TriageRecord, RECORD_VERSION};
