//! # skill-auditor
//!
//! Deterministic compliance auditing for agent skill directories.
//!
//! `skill-auditor` inspects a skill bundle (a directory whose behavior is
//! defined by a `SKILL.md` file), reduces it to a small fact record, and
//! classifies it as ready, ready with warnings, or blocked against a fixed
//! rule set. Reports render as human-readable text, JSON, or [SARIF].
//! An optional LLM collaborator can explain findings after the fact, but
//! the verdict itself never depends on it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use skill_auditor::{audit, config::Config, output};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let report = audit::run_audit(Path::new("./my-skill"), &config)
//!     .expect("audit failed");
//!
//! if report.verdict.passed() {
//!     println!("Skill is ready to ship");
//! } else {
//!     let text = output::format_report(&report, &output::OutputFormat::Pretty);
//!     print!("{text}");
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized around a pipeline:
//!
//! 1. **[`config`]**: load policy and settings from TOML files.
//! 2. **[`metrics`]**: extract the fact record ([`metrics::SkillMetrics`])
//!    from a skill directory. The only stage that touches the filesystem.
//! 3. **[`validate`]**: guard the extractor's structural contract.
//! 4. **[`rules`]**: apply the fixed rule set (B1, B2, W1) to the record.
//! 5. **[`verdict`]**: core data types ([`verdict::Finding`], [`verdict::Verdict`]).
//! 6. **[`audit`]**: orchestrate the stages into an [`audit::AuditReport`].
//! 7. **[`output`]**: format reports as pretty text, JSON, or SARIF.
//! 8. **[`analysis`]**: optional post-verdict LLM explanation.
//!
//! ## Rules
//!
//! | Rule | Kind | Description |
//! |------|------|-------------|
//! | `B1` | blocking | No forbidden sibling files (e.g. `README.md`) |
//! | `B2` | blocking | Closed YAML frontmatter with `name` + `description` |
//! | `W1` | advisory | `SKILL.md` under the recommended line count |
//!
//! Blocking rules gate release; advisory rules only degrade the verdict to
//! "ready with warnings". Identical directory content always produces an
//! identical verdict.
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod analysis;
pub mod audit;
pub mod config;
pub mod metrics;
pub mod output;
pub mod rules;
pub mod validate;
pub mod verdict;
