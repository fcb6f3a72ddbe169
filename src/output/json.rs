//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document containing skill metadata, the
//! full fact record, a finding-count summary, and the findings themselves.

use std::path::Path;

use crate::audit::AuditReport;
use crate::metrics::SkillMetrics;
use crate::verdict::{Classification, Finding};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    skill: &'a str,
    path: &'a Path,
    audit_timestamp: &'a str,
    classification: &'a Classification,
    passed: bool,
    metrics: &'a SkillMetrics,
    summary: Summary,
    blockers: &'a [Finding],
    warnings: &'a [Finding],
}

#[derive(serde::Serialize)]
struct Summary {
    blockers: usize,
    warnings: usize,
}

/// Formats an [`AuditReport`] as pretty-printed JSON.
///
/// The output carries the complete fact record alongside the verdict so a
/// consumer can re-derive the classification without re-reading the skill.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &AuditReport) -> String {
    let output = JsonOutput {
        skill: report.skill(),
        path: &report.path,
        audit_timestamp: &report.audit_timestamp,
        classification: &report.verdict.classification,
        passed: report.verdict.passed(),
        metrics: &report.metrics,
        summary: Summary {
            blockers: report.verdict.blockers.len(),
            warnings: report.verdict.warnings.len(),
        },
        blockers: &report.verdict.blockers,
        warnings: &report.verdict.warnings,
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
