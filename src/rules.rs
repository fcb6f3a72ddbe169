//! The fixed rule set and its evaluator.
//!
//! Three rules, evaluated in code order on every run:
//!
//! | Code | Kind     | Checks                                             |
//! |------|----------|----------------------------------------------------|
//! | B1   | blocking | no forbidden sibling files in the bundle           |
//! | B2   | blocking | frontmatter is closed and declares name/description|
//! | W1   | advisory | `SKILL.md` under the recommended line count        |
//!
//! [`evaluate`] is a pure function over a fact record and a policy; it
//! performs no I/O and never short-circuits. A failing blocker never
//! suppresses later rules, so a report always carries the complete list of
//! findings.

use crate::config::{Policy, EXPECTED_FENCE_COUNT};
use crate::metrics::SkillMetrics;
use crate::verdict::{Finding, RuleCode, RuleKind, Verdict};

/// Metadata for a single rule, for `list-rules` and `explain`.
pub struct RuleInfo {
    pub code: RuleCode,
    pub kind: RuleKind,
    /// One-line statement of what the rule requires.
    pub summary: &'static str,
    /// How to fix a violation.
    pub remediation: &'static str,
}

/// Applies the fixed rule set to a fact record and classifies the result.
pub fn evaluate(metrics: &SkillMetrics, policy: &Policy) -> Verdict {
    let mut blockers = Vec::new();
    let mut warnings = Vec::new();

    // B1: the bundle must not carry any denylisted sibling file.
    if !metrics.forbidden_files.is_empty() {
        blockers.push(Finding {
            code: RuleCode::B1,
            message: format!(
                "Forbidden files detected: {}",
                metrics.forbidden_files.join(", ")
            ),
        });
    }

    // B2: frontmatter must be a closed two-fence block declaring both
    // fields. All shortfalls are folded into one finding so the user
    // sees every problem at once.
    let frontmatter_ok = metrics.yaml_delimiters == EXPECTED_FENCE_COUNT
        && metrics.has_name
        && metrics.has_description;
    if !frontmatter_ok {
        let mut issues = Vec::new();
        if metrics.yaml_delimiters != EXPECTED_FENCE_COUNT {
            issues.push(format!(
                "expected {} yaml delimiters, found {}",
                EXPECTED_FENCE_COUNT, metrics.yaml_delimiters
            ));
        }
        if !metrics.has_name {
            issues.push("missing 'name' field".to_string());
        }
        if !metrics.has_description {
            issues.push("missing 'description' field".to_string());
        }
        blockers.push(Finding {
            code: RuleCode::B2,
            message: format!("Invalid YAML frontmatter ({})", issues.join(", ")),
        });
    }

    // W1: length is advisory only. Equal to the threshold already warns.
    if metrics.line_count >= policy.max_line_count {
        warnings.push(Finding {
            code: RuleCode::W1,
            message: format!(
                "SKILL.md is long ({} lines, recommended max {})",
                metrics.line_count, policy.max_line_count
            ),
        });
    }

    Verdict::from_findings(blockers, warnings)
}

/// Returns the full rule catalogue, in evaluation order.
pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            code: RuleCode::B1,
            kind: RuleKind::Blocking,
            summary: "No forbidden sibling files in the skill bundle",
            remediation: "Delete the listed files and fold their content into \
                          SKILL.md; the agent runtime only reads SKILL.md.",
        },
        RuleInfo {
            code: RuleCode::B2,
            kind: RuleKind::Blocking,
            summary: "SKILL.md opens with closed YAML frontmatter declaring \
                      name and description",
            remediation: "Start SKILL.md with a '---' line, declare non-empty \
                          'name:' and 'description:' fields, and close the \
                          block with a second '---' line.",
        },
        RuleInfo {
            code: RuleCode::W1,
            kind: RuleKind::Advisory,
            summary: "SKILL.md stays under the recommended line count",
            remediation: "Trim SKILL.md or move long reference material into \
                          supporting files inside the bundle.",
        },
    ]
}
