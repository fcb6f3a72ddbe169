//! Core verdict types: rule codes, findings, and the classified outcome.
//!
//! Everything here is pure data. Presentation (status labels, colors,
//! symbols) lives in [`output`](crate::output); the core only ever speaks
//! in tagged values.

use std::fmt;

/// Stable identifier of an audit rule.
///
/// `B*` codes block, `W*` codes advise. Codes are part of the tool's
/// contract with CI pipelines and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RuleCode {
    /// No forbidden sibling files in the bundle.
    B1,
    /// Well-formed frontmatter with `name` and `description`.
    B2,
    /// `SKILL.md` stays under the recommended line count.
    W1,
}

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::B1 => "B1",
            RuleCode::B2 => "B2",
            RuleCode::W1 => "W1",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a rule blocks release or merely advises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Blocking,
    Advisory,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Blocking => write!(f, "blocking"),
            RuleKind::Advisory => write!(f, "advisory"),
        }
    }
}

/// A single rule violation: stable code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub code: RuleCode,
    pub message: String,
}

/// Overall classification of one audit run.
///
/// Strict priority: any blocker forces [`Blocked`](Classification::Blocked)
/// no matter how many warnings are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Ready,
    ReadyWithWarnings,
    Blocked,
}

/// The evaluator's output: a classification plus the findings behind it.
///
/// Derived deterministically from a fact record and the fixed rule set;
/// two evaluations of the same record yield identical verdicts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Verdict {
    pub classification: Classification,
    /// Violated blocking rules, in rule order.
    pub blockers: Vec<Finding>,
    /// Violated advisory rules, in rule order.
    pub warnings: Vec<Finding>,
}

impl Verdict {
    /// Assembles a verdict from collected findings, applying the fixed
    /// priority: blockers force `Blocked`, otherwise any warning degrades
    /// to `ReadyWithWarnings`, otherwise `Ready`.
    pub fn from_findings(blockers: Vec<Finding>, warnings: Vec<Finding>) -> Verdict {
        let classification = if !blockers.is_empty() {
            Classification::Blocked
        } else if !warnings.is_empty() {
            Classification::ReadyWithWarnings
        } else {
            Classification::Ready
        };
        Verdict {
            classification,
            blockers,
            warnings,
        }
    }

    /// True unless the audit is blocked. Warnings still pass.
    pub fn passed(&self) -> bool {
        self.classification != Classification::Blocked
    }

    /// Whether the given rule appears among the findings.
    pub fn violated(&self, code: RuleCode) -> bool {
        self.blockers
            .iter()
            .chain(self.warnings.iter())
            .any(|f| f.code == code)
    }
}
