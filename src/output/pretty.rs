//! Human-readable colored text formatter.
//!
//! Produces a terminal-friendly report with ANSI color codes, showing the
//! extracted fact record, blockers, warnings, and a one-line status summary.

use crate::audit::AuditReport;
use crate::verdict::Classification;
use colored::Colorize;

/// Formats an [`AuditReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header**: skill name, path, and timestamp.
/// 2. **Metrics**: the fact record the verdict was derived from.
/// 3. **Blockers**: violated blocking rules, if any.
/// 4. **Warnings**: violated advisory rules, if any.
/// 5. **Status**: classification plus finding counts.
pub fn format(report: &AuditReport) -> String {
    let mut out = String::new();

    // Header
    out.push_str(&format!(
        "\n{}\n",
        format!("  Skill Audit: {}  ", report.skill())
            .bold()
            .on_blue()
            .white()
    ));
    out.push_str(&format!("  Path: {}\n", report.path.display()));
    out.push_str(&format!("  Timestamp: {}\n\n", report.audit_timestamp));

    // Fact record
    let metrics = &report.metrics;
    out.push_str(&format!("{}\n", "Metrics".bold().underline()));
    out.push_str(&format!("  {:<20} {}\n", "SKILL.md lines", metrics.line_count));
    out.push_str(&format!(
        "  {:<20} {}\n",
        "yaml delimiters", metrics.yaml_delimiters
    ));
    out.push_str(&format!(
        "  {:<20} {}\n",
        "name field",
        field_presence(metrics.has_name)
    ));
    out.push_str(&format!(
        "  {:<20} {}\n",
        "description field",
        field_presence(metrics.has_description)
    ));
    let forbidden = if metrics.forbidden_files.is_empty() {
        "none".to_string()
    } else {
        metrics.forbidden_files.join(", ")
    };
    out.push_str(&format!("  {:<20} {}\n\n", "forbidden files", forbidden));

    // Blockers
    if !report.verdict.blockers.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "Blockers".bold().underline(),
            report.verdict.blockers.len()
        ));
        for finding in &report.verdict.blockers {
            out.push_str(&format!(
                "  [{}] {}\n",
                finding.code.as_str().red().bold(),
                finding.message
            ));
        }
        out.push('\n');
    }

    // Warnings
    if !report.verdict.warnings.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "Warnings".bold().underline(),
            report.verdict.warnings.len()
        ));
        for finding in &report.verdict.warnings {
            out.push_str(&format!(
                "  [{}] {}\n",
                finding.code.as_str().yellow().bold(),
                finding.message
            ));
        }
        out.push('\n');
    }

    // Summary
    let status_str = match report.verdict.classification {
        Classification::Ready => "READY".green().bold().to_string(),
        Classification::ReadyWithWarnings => "READY WITH WARNINGS".yellow().bold().to_string(),
        Classification::Blocked => "BLOCKED".red().bold().to_string(),
    };
    out.push_str(&format!(
        "Status: {status_str}  |  {} blockers, {} warnings\n",
        report.verdict.blockers.len(),
        report.verdict.warnings.len(),
    ));

    out
}

fn field_presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "missing"
    }
}
