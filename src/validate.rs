//! Structural validation of extracted fact records.
//!
//! A contract check sitting between the extractor and the rule evaluator:
//! it asserts the [`SkillMetrics`] record is well-formed before any rule
//! logic sees it. This is not a policy check. A failure here means the
//! extractor itself is buggy, and the caller should surface it as a bug
//! report rather than a user-facing audit result.
//!
//! The unsigned field types already guarantee the non-negativity the
//! contract asks for; [`validate_metrics`] covers what the type system
//! cannot express.

use crate::config::EXPECTED_FENCE_COUNT;
use crate::metrics::SkillMetrics;

/// Internal-contract failure: the extractor produced a malformed record.
///
/// Names the first malformed field, in field order, so the defect is easy
/// to trace back to the extraction step that produced it.
#[derive(Debug, thiserror::Error)]
#[error("fact record field '{field}' is malformed: {detail}")]
pub struct ContractViolation {
    /// The first fact-record field that failed its contract.
    pub field: &'static str,
    /// What the field looked like versus what the contract requires.
    pub detail: String,
}

/// Asserts every [`SkillMetrics`] field satisfies the evaluator's contract.
///
/// Checks run in field order and stop at the first violation:
///
/// - `skill_name` must be non-empty.
/// - `yaml_delimiters` must be at most [`EXPECTED_FENCE_COUNT`]; the
///   extractor scans only the leading block, so a larger count can only
///   come from an extraction defect.
/// - `forbidden_files` entries must be non-empty bare file names, with no
///   path separators.
///
/// # Errors
///
/// Returns a [`ContractViolation`] naming the offending field.
pub fn validate_metrics(metrics: &SkillMetrics) -> Result<(), ContractViolation> {
    if metrics.skill_name.trim().is_empty() {
        return Err(ContractViolation {
            field: "skill_name",
            detail: "must be a non-empty string".to_string(),
        });
    }

    if metrics.yaml_delimiters > EXPECTED_FENCE_COUNT {
        return Err(ContractViolation {
            field: "yaml_delimiters",
            detail: format!(
                "must be at most {EXPECTED_FENCE_COUNT}, got {}",
                metrics.yaml_delimiters
            ),
        });
    }

    for name in &metrics.forbidden_files {
        if name.is_empty() {
            return Err(ContractViolation {
                field: "forbidden_files",
                detail: "entries must be non-empty file names".to_string(),
            });
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ContractViolation {
                field: "forbidden_files",
                detail: format!("entries must be bare file names, got '{name}'"),
            });
        }
    }

    Ok(())
}
