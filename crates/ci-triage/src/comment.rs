//! Debug comment keying and rendering.
//!
//! Builds the body of the single marked pull-request comment that repeated
//! triage runs update in place. Posting it is the caller's job; this module
//! only decides what it says and which existing comment it replaces.

use crate::observation::CiRunObservation;
use crate::signature::{fnv1a_hex, sanitize_excerpt};
use crate::triage::ExecutionPlan;
use serde::{Deserialize, Serialize};

/// Excerpt lines shown per failing check.
const EXCERPT_PREVIEW_LINES: usize = 20;

/// Stable hidden marker for `(repo, pr_number)`.
pub fn comment_marker(repo: &str, pr_number: u64) -> String {
    format!(
        "<!-- ci-triage:{} -->",
        fnv1a_hex(&format!("{repo}#{pr_number}"))
    )
}

/// A comment already on the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingComment {
    pub id: u64,
    pub body: String,
}

/// What the caller should do with the rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "comment_id")]
pub enum UpsertTarget {
    Update(u64),
    Create,
}

/// First existing comment carrying `marker`, else create.
pub fn upsert_target(existing: &[ExistingComment], marker: &str) -> UpsertTarget {
    existing
        .iter()
        .find(|c| c.body.contains(marker))
        .map_or(UpsertTarget::Create, |c| UpsertTarget::Update(c.id))
}

/// Render the markdown debug comment.
///
/// Deterministic: failing checks are listed sorted by name, and excerpts are
/// clipped and redacted the same way v3 signatures see them.
pub fn render_debug_comment(
    repo: &str,
    pr_number: u64,
    plan: &ExecutionPlan,
    observation: &CiRunObservation,
) -> String {
    let record = &plan.record;
    let mut out = String::new();

    out.push_str(&format!("{}\n", comment_marker(repo, pr_number)));
    out.push_str(&format!(
        "### CI triage: `{}` → `{}`\n\n",
        record.classification, record.action
    ));
    out.push_str(&format!(
        "- **Classification:** {} (`{}`)\n",
        record.classification, record.classification_reason
    ));
    out.push_str(&format!(
        "- **Action:** {} (`{}`)\n",
        record.action, record.action_reason
    ));
    out.push_str(&format!(
        "- **Attempt:** {}/{}{}\n",
        record.attempt,
        record.max_attempts,
        if plan.exhausted_budget {
            " (budget exhausted)"
        } else {
            ""
        }
    ));
    out.push_str(&format!(
        "- **Signature:** `{}` ({})\n",
        record.signature, record.signature_version
    ));
    out.push_str(&format!("- **Timed out:** {}\n", observation.timed_out));
    out.push_str(&format!(
        "- **Versions:** record v{}, decision v{}, classifier v{}\n",
        record.version, record.decision_version, record.classifier_version
    ));

    let mut failures: Vec<_> = observation.failures.iter().collect();
    failures.sort_by(|a, b| {
        (&a.name, &a.raw_state, a.excerpt_or_empty()).cmp(&(
            &b.name,
            &b.raw_state,
            b.excerpt_or_empty(),
        ))
    });

    if !failures.is_empty() {
        out.push_str("\n#### Failing checks\n");
        for failure in failures {
            out.push_str(&format!("- `{}`: {}\n", failure.name, failure.raw_state));
            let excerpt = sanitize_excerpt(failure.excerpt_or_empty());
            if excerpt.trim().is_empty() {
                continue;
            }
            out.push_str("  ```text\n");
            for line in excerpt.lines().take(EXCERPT_PREVIEW_LINES) {
                out.push_str(&format!("  {}\n", line.replace("```", "'''")));
            }
            out.push_str("  ```\n");
        }
    }

    out
}
