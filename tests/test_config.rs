use std::path::Path;

use skill_auditor::config::{Config, EXPECTED_FENCE_COUNT, FRONTMATTER_FENCE};

#[test]
fn defaults_match_the_published_policy() {
    let config = Config::default();
    assert_eq!(config.policy.forbidden_files, vec!["README.md", "INSTALL.md"]);
    assert_eq!(config.policy.max_line_count, 500);
    assert!(!config.strict.enabled);
    assert_eq!(config.analysis.command, "claude");
    assert_eq!(config.analysis.model, "claude-sonnet-4-5");
}

#[test]
fn fence_constants_describe_yaml_frontmatter() {
    assert_eq!(FRONTMATTER_FENCE, "---");
    assert_eq!(EXPECTED_FENCE_COUNT, 2);
}

#[test]
fn load_none_without_a_file_uses_defaults() {
    // The test working directory carries no skill-auditor.toml.
    let config = Config::load(None).unwrap();
    assert_eq!(config.policy.max_line_count, 500);
}

#[test]
fn load_explicit_missing_path_errors() {
    let err = Config::load(Some(Path::new("tests/fixtures/does-not-exist.toml"))).unwrap_err();
    assert!(err.contains("Config file not found"), "got: {err}");
}

#[test]
fn load_parses_an_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auditor.toml");
    std::fs::write(
        &path,
        "[policy]\nforbidden_files = [\"NOTES.md\"]\nmax_line_count = 200\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.policy.forbidden_files, vec!["NOTES.md"]);
    assert_eq!(config.policy.max_line_count, 200);
    // Unspecified sections keep their defaults.
    assert!(!config.strict.enabled);
    assert_eq!(config.analysis.command, "claude");
}

#[test]
fn partial_file_keeps_other_sections_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auditor.toml");
    std::fs::write(&path, "[strict]\nenabled = true\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert!(config.strict.enabled);
    assert_eq!(config.policy.forbidden_files, vec!["README.md", "INSTALL.md"]);
    assert_eq!(config.policy.max_line_count, 500);
}

#[test]
fn malformed_toml_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auditor.toml");
    std::fs::write(&path, "policy = [\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.contains("Failed to parse config"), "got: {err}");
}
