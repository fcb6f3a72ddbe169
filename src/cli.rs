use clap::{Parser, Subcommand};
use skill_auditor::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skill-auditor",
    version,
    about = "Compliance auditing for agent skill directories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a single skill directory
    Audit {
        /// Path to the skill directory
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Exit non-zero on warnings as well as blockers
        #[arg(long)]
        strict: bool,

        /// Ask the Claude Code CLI to explain findings and suggest fixes
        #[arg(long)]
        explain: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Audit all skill directories inside a collection directory
    #[command(name = "audit-all")]
    AuditAll {
        /// Path to a directory containing multiple skill subdirectories
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Exit non-zero on warnings as well as blockers
        #[arg(long)]
        strict: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the audit rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule code (e.g., "B1")
        rule: String,
    },
}
