//! Configuration loading and the audit policy.
//!
//! Provides the TOML-based configuration file and the named policy values
//! (forbidden-file denylist, line-count threshold, frontmatter fence token)
//! that the extractor and the rule evaluator consume. Keeping these in one
//! place means retuning the policy never touches rule logic.
//!
//! # Configuration file
//!
//! The default configuration file is `skill-auditor.toml` in the current
//! working directory. Use [`Config::load`] to read it:
//!
//! ```rust,no_run
//! use skill_auditor::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert_eq!(config.policy.max_line_count, 500);
//! ```
//!
//! # File format
//!
//! ```toml
//! [policy]
//! forbidden_files = ["README.md", "INSTALL.md"]
//! max_line_count = 500
//!
//! [strict]
//! enabled = false
//!
//! [analysis]
//! command = "claude"
//! model = "claude-sonnet-4-5"
//! ```

use std::path::Path;

/// The frontmatter fence token. A line consisting solely of this token
/// (modulo surrounding whitespace) opens or closes the frontmatter block.
pub const FRONTMATTER_FENCE: &str = "---";

/// Number of fence lines a well-formed frontmatter block carries.
pub const EXPECTED_FENCE_COUNT: usize = 2;

/// Main configuration for the auditor.
///
/// Loaded from a TOML file (typically `skill-auditor.toml`). All fields
/// carry defaults so the config file can be omitted entirely.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// The compliance policy applied by the extractor and rule evaluator.
    pub policy: Policy,
    /// When strict mode is enabled, a READY WITH WARNINGS verdict fails the
    /// process exit code. The verdict itself is never altered.
    pub strict: StrictConfig,
    /// External analysis collaborator settings (`audit --explain`).
    pub analysis: AnalysisConfig,
}

/// Named policy values consumed by the extractor and the rule evaluator.
///
/// The defaults reproduce the published skill requirements: `README.md` and
/// `INSTALL.md` may not sit next to `SKILL.md`, and `SKILL.md` should stay
/// under 500 lines.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Policy {
    /// Denylisted sibling filenames, matched exactly and case-sensitively
    /// against the immediate entries of the skill directory.
    pub forbidden_files: Vec<String>,
    /// Inclusive line-count threshold for the W1 advisory rule: a SKILL.md
    /// with this many lines or more is flagged as long.
    pub max_line_count: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            forbidden_files: vec!["README.md".to_string(), "INSTALL.md".to_string()],
            max_line_count: 500,
        }
    }
}

/// Strict-mode configuration.
///
/// When [`enabled`](StrictConfig::enabled) is `true`, the CLI exits non-zero
/// for READY WITH WARNINGS audits as well as BLOCKED ones. Classification is
/// unaffected: strict mode stops at the exit-code boundary.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct StrictConfig {
    /// Set to `true` to treat advisory findings as failures at exit time.
    pub enabled: bool,
}

/// External analysis collaborator settings.
///
/// The analyzer shells out to the Claude Code CLI. Both the command name and
/// the model are overridable so environments with a wrapper binary or a
/// different model alias do not need code changes.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Binary invoked for `audit --explain` (must be on `PATH`).
    pub command: String,
    /// Model identifier passed to the analysis command.
    pub model: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            command: "claude".to_string(),
            model: "claude-sonnet-4-5".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try `skill-auditor.toml` in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when:
    /// - The explicit path does not exist.
    /// - The file cannot be read from disk.
    /// - The TOML content fails to parse.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use skill_auditor::config::Config;
    ///
    /// // Explicit path
    /// let cfg = Config::load(Some(Path::new("my-config.toml")))?;
    ///
    /// // Auto-detect or default
    /// let cfg = Config::load(None)?;
    /// # Ok::<(), String>(())
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let config_path = if let Some(p) = path {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(format!("Config file not found: {}", p.display()));
            }
        } else {
            let default_path = Path::new("skill-auditor.toml");
            if default_path.exists() {
                Some(default_path.to_path_buf())
            } else {
                None
            }
        };

        match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
                let config: Config = toml::from_str(&content)
                    .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }
}
