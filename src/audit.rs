//! Audit orchestration: extract, validate, evaluate, assemble.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::metrics::{self, SkillMetrics};
use crate::rules;
use crate::validate::{self, ContractViolation};
use crate::verdict::Verdict;

/// Everything one audit run produced, ready for any output format.
#[derive(Debug, serde::Serialize)]
pub struct AuditReport {
    /// Directory that was audited.
    pub path: PathBuf,
    /// RFC 3339 timestamp of when the audit ran.
    pub audit_timestamp: String,
    /// The fact record the verdict was derived from.
    pub metrics: SkillMetrics,
    pub verdict: Verdict,
}

impl AuditReport {
    /// Display name of the audited skill.
    pub fn skill(&self) -> &str {
        &self.metrics.skill_name
    }
}

/// Ways a single audit can fail before producing a verdict.
///
/// Extraction errors are environmental (bad path, unreadable file) and are
/// the user's to fix. A contract violation means the extractor itself
/// produced a malformed fact record, which is a bug in this tool.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Extraction(#[from] metrics::ExtractError),
    #[error("internal contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

/// Runs the full pipeline against one skill directory.
///
/// The fact record is checked against its structural contract before the
/// rules see it, so the evaluator can assume well-formed input.
pub fn run_audit(path: &Path, config: &Config) -> Result<AuditReport, AuditError> {
    let metrics = metrics::extract_metrics(path, &config.policy)?;
    validate::validate_metrics(&metrics)?;
    let verdict = rules::evaluate(&metrics, &config.policy);

    Ok(AuditReport {
        path: path.to_path_buf(),
        audit_timestamp: chrono::Utc::now().to_rfc3339(),
        metrics,
        verdict,
    })
}
