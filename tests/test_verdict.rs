use skill_auditor::verdict::{Classification, Finding, RuleCode, Verdict};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn finding(code: RuleCode) -> Finding {
    Finding {
        code,
        message: format!("{code} fired"),
    }
}

// ---------------------------------------------------------------------------
// Classification priority
// ---------------------------------------------------------------------------

#[test]
fn no_findings_is_ready() {
    let verdict = Verdict::from_findings(vec![], vec![]);
    assert_eq!(verdict.classification, Classification::Ready);
    assert!(verdict.passed());
}

#[test]
fn warnings_only_is_ready_with_warnings() {
    let verdict = Verdict::from_findings(vec![], vec![finding(RuleCode::W1)]);
    assert_eq!(verdict.classification, Classification::ReadyWithWarnings);
    assert!(verdict.passed(), "warnings must not gate");
}

#[test]
fn blockers_only_is_blocked() {
    let verdict = Verdict::from_findings(vec![finding(RuleCode::B1)], vec![]);
    assert_eq!(verdict.classification, Classification::Blocked);
    assert!(!verdict.passed());
}

#[test]
fn one_blocker_outranks_any_number_of_warnings() {
    let warnings = vec![finding(RuleCode::W1); 10];
    let verdict = Verdict::from_findings(vec![finding(RuleCode::B2)], warnings);
    assert_eq!(verdict.classification, Classification::Blocked);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[test]
fn violated_sees_both_finding_lists() {
    let verdict = Verdict::from_findings(vec![finding(RuleCode::B1)], vec![finding(RuleCode::W1)]);
    assert!(verdict.violated(RuleCode::B1));
    assert!(verdict.violated(RuleCode::W1));
    assert!(!verdict.violated(RuleCode::B2));
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[test]
fn classification_serializes_snake_case() {
    let value = serde_json::to_value(Classification::ReadyWithWarnings).unwrap();
    assert_eq!(value, serde_json::json!("ready_with_warnings"));
    let value = serde_json::to_value(Classification::Blocked).unwrap();
    assert_eq!(value, serde_json::json!("blocked"));
}

#[test]
fn rule_code_serializes_as_its_code() {
    let value = serde_json::to_value(RuleCode::B1).unwrap();
    assert_eq!(value, serde_json::json!("B1"));
}

#[test]
fn verdict_round_trips_through_json() {
    let verdict = Verdict::from_findings(
        vec![Finding {
            code: RuleCode::B1,
            message: "Forbidden files detected: README.md".to_string(),
        }],
        vec![],
    );
    let json = serde_json::to_string(&verdict).unwrap();
    let back: Verdict = serde_json::from_str(&json).unwrap();
    assert_eq!(back, verdict);
}
