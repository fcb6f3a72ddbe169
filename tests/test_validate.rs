use skill_auditor::metrics::SkillMetrics;
use skill_auditor::validate::validate_metrics;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn valid_metrics() -> SkillMetrics {
    SkillMetrics {
        skill_name: "my-skill".to_string(),
        line_count: 42,
        yaml_delimiters: 2,
        has_name: true,
        has_description: true,
        forbidden_files: vec![],
    }
}

// ---------------------------------------------------------------------------
// Well-formed records
// ---------------------------------------------------------------------------

#[test]
fn valid_record_passes() {
    assert!(validate_metrics(&valid_metrics()).is_ok());
}

#[test]
fn rule_violations_are_not_contract_violations() {
    // A record full of policy problems is still structurally sound; the
    // rule evaluator, not the validator, judges it.
    let metrics = SkillMetrics {
        yaml_delimiters: 0,
        has_name: false,
        has_description: false,
        forbidden_files: vec!["README.md".to_string(), "INSTALL.md".to_string()],
        ..valid_metrics()
    };
    assert!(validate_metrics(&metrics).is_ok());
}

#[test]
fn every_fence_count_in_domain_passes() {
    for fences in 0..=2 {
        let metrics = SkillMetrics {
            yaml_delimiters: fences,
            ..valid_metrics()
        };
        assert!(
            validate_metrics(&metrics).is_ok(),
            "{fences} fences should be in the valid domain"
        );
    }
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

#[test]
fn empty_skill_name_violates() {
    let metrics = SkillMetrics {
        skill_name: String::new(),
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "skill_name");
}

#[test]
fn whitespace_skill_name_violates() {
    let metrics = SkillMetrics {
        skill_name: "   ".to_string(),
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "skill_name");
}

#[test]
fn fence_count_above_domain_violates() {
    let metrics = SkillMetrics {
        yaml_delimiters: 3,
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "yaml_delimiters");
    assert!(err.detail.contains("at most 2"), "got: {}", err.detail);
}

#[test]
fn forbidden_entry_with_path_separator_violates() {
    let metrics = SkillMetrics {
        forbidden_files: vec!["docs/README.md".to_string()],
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "forbidden_files");
}

#[test]
fn forbidden_entry_with_backslash_violates() {
    let metrics = SkillMetrics {
        forbidden_files: vec!["docs\\README.md".to_string()],
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "forbidden_files");
}

#[test]
fn empty_forbidden_entry_violates() {
    let metrics = SkillMetrics {
        forbidden_files: vec![String::new()],
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "forbidden_files");
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[test]
fn first_violation_in_field_order_wins() {
    let metrics = SkillMetrics {
        skill_name: String::new(),
        yaml_delimiters: 9,
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert_eq!(err.field, "skill_name");
}

#[test]
fn violation_message_names_the_field() {
    let metrics = SkillMetrics {
        skill_name: String::new(),
        ..valid_metrics()
    };
    let err = validate_metrics(&metrics).unwrap_err();
    assert!(
        err.to_string().contains("fact record field 'skill_name'"),
        "got: {err}"
    );
}
