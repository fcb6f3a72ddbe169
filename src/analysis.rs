//! Optional LLM analysis of a finished audit report.
//!
//! This is an **external** collaborator: it requires the Claude Code CLI
//! (`claude`) to be installed on `PATH`.  It runs strictly *after* the
//! deterministic verdict exists and can never change it: analysis output
//! is prose commentary, and analysis failure degrades to a categorized
//! hint instead of failing the audit.
//!
//! # How it works
//!
//! 1. [`build_analysis_prompt`] serializes the fact record to JSON and
//!    pairs it with a PASS/FAIL line per rule.
//! 2. The prompt is piped to `claude -p --model <model> --max-turns 1`
//!    over stdin (prompts embed the whole fact record and can exceed
//!    argv length limits).
//! 3. Stdout becomes the analysis text; a non-zero exit is bucketed by
//!    [`AnalysisError::categorize`] so the CLI can print guidance that
//!    matches the failure (auth, network, rate limit, unknown).

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::audit::AuditReport;
use crate::config::{Config, Policy};
use crate::verdict::RuleCode;

// ---------------------------------------------------------------------------
// Error categorization
// ---------------------------------------------------------------------------

static RE_AUTHENTICATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)authentication|unauthori[sz]ed|api.?key|credential|\b401\b").unwrap()
});

static RE_NETWORK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)connection|network|\bdns\b|could not resolve|unreachable|timed?.?out").unwrap()
});

static RE_RATE_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rate.?limit|too many requests|overloaded|\b429\b").unwrap()
});

/// Why the analysis collaborator failed.
///
/// None of these is ever fatal to an audit; by the time they can occur the
/// deterministic verdict has already been produced and printed.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis command '{command}' not found on PATH")]
    Unavailable { command: String },
    #[error("authentication failed: {detail}")]
    Authentication { detail: String },
    #[error("network failure: {detail}")]
    Network { detail: String },
    #[error("rate limited: {detail}")]
    RateLimit { detail: String },
    #[error("analysis failed: {detail}")]
    Unknown { detail: String },
}

impl AnalysisError {
    /// Buckets a raw failure message from the external tool.
    ///
    /// Word-boundary patterns keep short tokens honest: "40111" must not
    /// read as a 401, nor "accurate" as a rate limit.
    pub fn categorize(detail: String) -> AnalysisError {
        if RE_AUTHENTICATION.is_match(&detail) {
            AnalysisError::Authentication { detail }
        } else if RE_NETWORK.is_match(&detail) {
            AnalysisError::Network { detail }
        } else if RE_RATE_LIMIT.is_match(&detail) {
            AnalysisError::RateLimit { detail }
        } else {
            AnalysisError::Unknown { detail }
        }
    }

    /// Actionable next step for the user, matched to the category.
    pub fn guidance(&self) -> &'static str {
        match self {
            AnalysisError::Unavailable { .. } => {
                "Install the Claude Code CLI (https://docs.anthropic.com/en/docs/claude-code) \
                 or rerun without --explain."
            }
            AnalysisError::Authentication { .. } => {
                "Check your ANTHROPIC_API_KEY environment variable: \
                 export ANTHROPIC_API_KEY=your-key-here"
            }
            AnalysisError::Network { .. } => "Check your internet connection and try again.",
            AnalysisError::RateLimit { .. } => "Wait a moment and try again.",
            AnalysisError::Unknown { .. } => {
                "This may be a temporary service issue; try again later or check \
                 https://status.anthropic.com"
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Analyzer trait and the Claude CLI implementation
// ---------------------------------------------------------------------------

/// An external analysis capability.
///
/// Implementations take a finished [`AuditReport`] and return free-form
/// explanatory text.  [`is_available`](Analyzer::is_available) lets the
/// caller skip the call (and say why) when the backing tool is missing.
pub trait Analyzer {
    /// Short name used in user-facing messages.
    fn name(&self) -> &'static str;

    /// Whether the collaborator can run at all (e.g. binary on `PATH`).
    fn is_available(&self) -> bool;

    /// Produces explanatory prose for the report.
    fn analyze(&self, report: &AuditReport) -> Result<String, AnalysisError>;
}

/// Analysis via the Claude Code CLI.
///
/// Spawns `claude -p --model <model> --max-turns 1` with the prompt on
/// stdin.  Single turn, and the prompt instructs the model to reason only
/// over the fact record embedded in it, never re-read the skill directory.
pub struct ClaudeCliAnalyzer {
    command: String,
    model: String,
    policy: Policy,
}

impl ClaudeCliAnalyzer {
    pub fn new(config: &Config) -> ClaudeCliAnalyzer {
        ClaudeCliAnalyzer {
            command: config.analysis.command.clone(),
            model: config.analysis.model.clone(),
            policy: config.policy.clone(),
        }
    }
}

impl Analyzer for ClaudeCliAnalyzer {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn is_available(&self) -> bool {
        which_exists(&self.command)
    }

    fn analyze(&self, report: &AuditReport) -> Result<String, AnalysisError> {
        if !self.is_available() {
            return Err(AnalysisError::Unavailable {
                command: self.command.clone(),
            });
        }

        let prompt = build_analysis_prompt(report, &self.policy);

        let mut child = match Command::new(&self.command)
            .arg("-p")
            .arg("--model")
            .arg(&self.model)
            .arg("--max-turns")
            .arg("1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            // The binary can disappear between the PATH probe and the spawn.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AnalysisError::Unavailable {
                    command: self.command.clone(),
                });
            }
            Err(e) => {
                return Err(AnalysisError::Unknown {
                    detail: format!("failed to launch '{}': {}", self.command, e),
                });
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).map_err(|e| AnalysisError::Unknown {
                detail: format!("failed to send prompt to '{}': {}", self.command, e),
            })?;
            // Dropping the handle closes the pipe so the CLI sees EOF.
        }

        let output = child.wait_with_output().map_err(|e| AnalysisError::Unknown {
            detail: format!("failed to read output from '{}': {}", self.command, e),
        })?;

        if !output.status.success() {
            return Err(AnalysisError::categorize(failure_detail(&output)));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(AnalysisError::Unknown {
                detail: "analysis produced no output".to_string(),
            });
        }
        Ok(text)
    }
}

/// Collapses a failed invocation into one detail string for categorization.
///
/// The CLI reports errors on stderr or, for some API failures, as a JSON
/// blob on stdout, so both streams are considered.
fn failure_detail(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = format!("{} {}", stderr.trim(), stdout.trim())
        .trim()
        .to_string();
    if detail.is_empty() {
        format!("exited with {}", output.status)
    } else {
        detail
    }
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// Builds the analysis prompt for a finished report.
///
/// Pure function of the report and the policy: the prompt embeds the fact
/// record as JSON plus one PASS/FAIL line per rule, and instructs the
/// model to base its report only on that data.
pub fn build_analysis_prompt(report: &AuditReport, policy: &Policy) -> String {
    let metrics_json =
        serde_json::to_string_pretty(&report.metrics).expect("JSON serialization failed");

    let b1 = pass_fail(!report.verdict.violated(RuleCode::B1));
    let b2 = pass_fail(!report.verdict.violated(RuleCode::B2));
    let w1 = pass_fail(!report.verdict.violated(RuleCode::W1));

    format!(
        r#"Audit the following skill metrics:

## Extracted Metrics

```json
{metrics_json}
```

## Binary Check Results

BLOCKERS (official requirements):
- B1: No forbidden files ({denylist}) -> {b1}
- B2: Valid YAML frontmatter with name + description -> {b2}

WARNINGS (soft recommendations):
- W1: SKILL.md under {max_lines} lines -> {w1}

## Your Task

Generate a skill audit report following this format:

# Skill Audit Report: {skill_name}

Status: [BLOCKED | READY WITH WARNINGS | READY]

Breakdown:
- Blockers: [count]
- Warnings: [count]

## Blockers ([count])

[List each failed blocker with specific evidence from the metrics]

## Warnings ([count])

[List each failed warning with specific evidence from the metrics]

## Next Steps

[Specific, actionable fixes for the failed checks]

IMPORTANT: Base your analysis ONLY on the metrics provided above. Do not
re-extract or assume additional data.
"#,
        metrics_json = metrics_json,
        denylist = policy.forbidden_files.join(", "),
        max_lines = policy.max_line_count,
        b1 = b1,
        b2 = b2,
        w1 = w1,
        skill_name = report.skill(),
    )
}

fn pass_fail(pass: bool) -> &'static str {
    if pass {
        "PASS"
    } else {
        "FAIL"
    }
}

// ---------------------------------------------------------------------------
// PATH probing
// ---------------------------------------------------------------------------

/// Returns `true` if an executable named `cmd` exists on `PATH`.
pub fn which_exists(cmd: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var).any(|dir| is_executable(&dir.join(cmd)))
}

/// On Unix the candidate must carry an execute bit; a plain file on `PATH`
/// would probe as present but fail at spawn time.
fn is_executable(candidate: &Path) -> bool {
    if !candidate.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(candidate)
            .map(|meta| meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        true
    }
}
