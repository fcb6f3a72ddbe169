use std::path::Path;

use skill_auditor::analysis::{
    build_analysis_prompt, which_exists, AnalysisError, Analyzer, ClaudeCliAnalyzer,
};
use skill_auditor::audit::AuditReport;
use skill_auditor::config::Config;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn blocked_report() -> AuditReport {
    let config = Config::default();
    skill_auditor::audit::run_audit(Path::new("tests/fixtures/dirty-skill"), &config).unwrap()
}

fn ready_report() -> AuditReport {
    let config = Config::default();
    skill_auditor::audit::run_audit(Path::new("tests/fixtures/clean-skill"), &config).unwrap()
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

#[test]
fn prompt_embeds_the_fact_record_as_json() {
    let report = blocked_report();
    let prompt = build_analysis_prompt(&report, &Config::default().policy);

    assert!(prompt.contains("\"line_count\""));
    assert!(prompt.contains("\"yaml_delimiters\""));
    assert!(prompt.contains("dirty-skill"));
}

#[test]
fn prompt_marks_failed_rules() {
    let report = blocked_report();
    let prompt = build_analysis_prompt(&report, &Config::default().policy);

    assert!(
        prompt.contains("B1: No forbidden files (README.md, INSTALL.md) -> FAIL"),
        "got:\n{prompt}"
    );
    assert!(prompt.contains("B2: Valid YAML frontmatter with name + description -> FAIL"));
    assert!(prompt.contains("W1: SKILL.md under 500 lines -> PASS"));
}

#[test]
fn prompt_marks_all_rules_pass_for_ready_skill() {
    let report = ready_report();
    let prompt = build_analysis_prompt(&report, &Config::default().policy);

    assert_eq!(prompt.matches("-> PASS").count(), 3, "got:\n{prompt}");
    assert!(!prompt.contains("-> FAIL"));
}

#[test]
fn prompt_confines_the_model_to_provided_data() {
    let report = ready_report();
    let prompt = build_analysis_prompt(&report, &Config::default().policy);

    assert!(prompt.contains("ONLY on the metrics provided above"));
}

// ---------------------------------------------------------------------------
// Error categorization
// ---------------------------------------------------------------------------

#[test]
fn auth_failures_are_categorized() {
    let err = AnalysisError::categorize("HTTP 401 Unauthorized".to_string());
    assert!(matches!(err, AnalysisError::Authentication { .. }), "got: {err:?}");

    let err = AnalysisError::categorize("invalid x-api-key header".to_string());
    assert!(matches!(err, AnalysisError::Authentication { .. }), "got: {err:?}");
}

#[test]
fn network_failures_are_categorized() {
    let err = AnalysisError::categorize("connection refused".to_string());
    assert!(matches!(err, AnalysisError::Network { .. }), "got: {err:?}");

    let err = AnalysisError::categorize("Could not resolve host: api.anthropic.com".to_string());
    assert!(matches!(err, AnalysisError::Network { .. }), "got: {err:?}");
}

#[test]
fn rate_limit_failures_are_categorized() {
    let err = AnalysisError::categorize("429 Too Many Requests".to_string());
    assert!(matches!(err, AnalysisError::RateLimit { .. }), "got: {err:?}");

    let err = AnalysisError::categorize("server overloaded, retry later".to_string());
    assert!(matches!(err, AnalysisError::RateLimit { .. }), "got: {err:?}");
}

#[test]
fn unrelated_failures_stay_unknown() {
    let err = AnalysisError::categorize("the model said something odd".to_string());
    assert!(matches!(err, AnalysisError::Unknown { .. }), "got: {err:?}");
}

#[test]
fn substring_lookalikes_do_not_miscategorize() {
    // "accurate" contains "rate" and "4011" contains "401"; neither is a
    // real failure signal and both must fall through to Unknown.
    let err = AnalysisError::categorize("output was not accurate enough".to_string());
    assert!(matches!(err, AnalysisError::Unknown { .. }), "got: {err:?}");

    let err = AnalysisError::categorize("wrote 40111 bytes then stopped".to_string());
    assert!(matches!(err, AnalysisError::Unknown { .. }), "got: {err:?}");
}

#[test]
fn authentication_outranks_other_categories() {
    let err = AnalysisError::categorize("connection ok but api key rejected".to_string());
    assert!(matches!(err, AnalysisError::Authentication { .. }), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// Guidance
// ---------------------------------------------------------------------------

#[test]
fn auth_guidance_names_the_env_var() {
    let err = AnalysisError::categorize("401 unauthorized".to_string());
    assert!(err.guidance().contains("ANTHROPIC_API_KEY"));
}

#[test]
fn unavailable_guidance_offers_a_way_out() {
    let err = AnalysisError::Unavailable {
        command: "claude".to_string(),
    };
    assert!(err.guidance().contains("--explain"));
}

#[test]
fn every_category_has_guidance() {
    let errors = [
        AnalysisError::Unavailable {
            command: "claude".to_string(),
        },
        AnalysisError::categorize("401".to_string()),
        AnalysisError::categorize("network down".to_string()),
        AnalysisError::categorize("rate limit hit".to_string()),
        AnalysisError::categorize("???".to_string()),
    ];
    for err in errors {
        assert!(!err.guidance().is_empty(), "no guidance for {err:?}");
    }
}

// ---------------------------------------------------------------------------
// Analyzer trait seam
// ---------------------------------------------------------------------------

struct CannedAnalyzer {
    text: &'static str,
}

impl Analyzer for CannedAnalyzer {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn analyze(&self, _report: &AuditReport) -> Result<String, AnalysisError> {
        Ok(self.text.to_string())
    }
}

#[test]
fn any_analyzer_implementation_slots_in() {
    // The trait must stay object-safe so callers can hold a boxed analyzer.
    let analyzer: &dyn Analyzer = &CannedAnalyzer { text: "Looks fine." };
    assert!(analyzer.is_available());
    assert_eq!(analyzer.analyze(&ready_report()).unwrap(), "Looks fine.");
}

// ---------------------------------------------------------------------------
// Claude CLI analyzer (no live calls)
// ---------------------------------------------------------------------------

#[test]
fn analyzer_reports_missing_command_as_unavailable() {
    let mut config = Config::default();
    config.analysis.command = "skill-auditor-no-such-binary".to_string();

    let analyzer = ClaudeCliAnalyzer::new(&config);
    assert!(!analyzer.is_available());

    let err = analyzer.analyze(&ready_report()).unwrap_err();
    assert!(matches!(err, AnalysisError::Unavailable { .. }), "got: {err:?}");
    assert!(err.to_string().contains("not found on PATH"));
}

#[test]
fn which_exists_rejects_nonsense() {
    assert!(!which_exists("skill-auditor-no-such-binary"));
}

#[cfg(unix)]
#[test]
fn which_exists_finds_a_shell() {
    assert!(which_exists("sh"));
}
