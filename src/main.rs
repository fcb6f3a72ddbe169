mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use rayon::prelude::*;
use skill_auditor::analysis::{Analyzer, ClaudeCliAnalyzer};
use skill_auditor::audit::{self, AuditError, AuditReport};
use skill_auditor::verdict::{Classification, RuleKind, Verdict};
use skill_auditor::{config, output, rules};
use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            path,
            format,
            output: output_path,
            strict,
            explain,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }
            if !path.is_dir() {
                eprintln!("Error: not a directory: {}", path.display());
                std::process::exit(2);
            }

            // Detect collection directories early to give a helpful error
            // rather than a confusing "SKILL.md not found" failure.
            let skill_children = find_skill_dirs(&path);
            if !path.join("SKILL.md").exists() && !skill_children.is_empty() {
                eprintln!(
                    "Error: '{}' looks like a skills collection directory, not a single skill.",
                    path.display()
                );
                eprintln!();
                eprintln!("To audit all skills at once:");
                eprintln!("  skill-auditor audit-all {}", path.display());
                eprintln!();
                eprintln!("To audit a specific skill:");
                for child in &skill_children {
                    eprintln!("  skill-auditor audit {}", child.display());
                }
                std::process::exit(2);
            }

            let mut config = config::Config::load(config_path.as_deref()).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            if strict {
                config.strict.enabled = true;
            }

            let report = match audit::run_audit(&path, &config) {
                Ok(report) => report,
                Err(e) => exit_audit_error(e),
            };
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");

                if matches!(format, output::OutputFormat::Pretty)
                    && !explain
                    && report.verdict.classification != Classification::Ready
                {
                    println!(
                        "{}",
                        "Tip: rerun with --explain for fix suggestions".dimmed()
                    );
                }
            }

            if explain {
                run_analysis(&report, &config, &format);
            }

            std::process::exit(exit_code(&report.verdict, config.strict.enabled));
        }

        Commands::AuditAll {
            path,
            format,
            strict,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }
            if !path.is_dir() {
                eprintln!("Error: not a directory: {}", path.display());
                std::process::exit(2);
            }

            let skill_dirs = find_skill_dirs(&path);
            if skill_dirs.is_empty() {
                eprintln!(
                    "Error: no skill directories found in '{}' (no subdirectory contains a SKILL.md)",
                    path.display()
                );
                std::process::exit(2);
            }

            let mut config = config::Config::load(config_path.as_deref()).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            if strict {
                config.strict.enabled = true;
            }

            // Each directory is an independent audit, so the collection runs
            // in parallel; collect() keeps directory order for the output.
            let outcomes: Vec<(PathBuf, Result<AuditReport, AuditError>)> = skill_dirs
                .par_iter()
                .map(|dir| (dir.clone(), audit::run_audit(dir, &config)))
                .collect();

            for (dir, outcome) in &outcomes {
                match outcome {
                    Ok(report) => {
                        print!("{}", output::format_report(report, &format));
                    }
                    Err(e) => {
                        eprintln!("Error auditing {}: {}", dir.display(), e);
                    }
                }
            }

            // Print collection summary for pretty format
            if matches!(format, output::OutputFormat::Pretty) {
                print!("{}", format_collection_summary(&path, &outcomes));
            }

            let any_error = outcomes.iter().any(|(_, o)| o.is_err());
            let any_blocked = outcomes.iter().any(|(_, o)| {
                matches!(o, Ok(r) if exit_code(&r.verdict, config.strict.enabled) != 0)
            });
            std::process::exit(if any_error {
                2
            } else if any_blocked {
                1
            } else {
                0
            });
        }

        Commands::ListRules => {
            let catalogue = rules::rules();
            println!("{}", "Audit Rules".bold().underline());
            println!();

            for info in &catalogue {
                let kind = match info.kind {
                    RuleKind::Blocking => "BLOCK".red().bold().to_string(),
                    RuleKind::Advisory => " WARN".yellow().bold().to_string(),
                };
                println!(
                    "  [{kind}] {code:<4} {summary}",
                    code = info.code.as_str(),
                    summary = info.summary,
                );
            }

            println!();
            println!("  Total: {} rules", catalogue.len());
        }

        Commands::Explain { rule } => {
            let catalogue = rules::rules();
            match catalogue.iter().find(|info| info.code.as_str() == rule) {
                Some(info) => {
                    println!("{}", info.code.as_str().bold());
                    println!();
                    println!("  Kind:         {}", info.kind);
                    println!("  Description:  {}", info.summary);
                    println!("  Remediation:  {}", info.remediation);
                }
                None => {
                    eprintln!("Unknown rule: {rule}");
                    eprintln!("Use 'skill-auditor list-rules' to see all available rules.");
                    std::process::exit(2);
                }
            }
        }
    }
}

/// Maps a verdict to the process exit code. Strict mode promotes warnings
/// to a failing exit without touching the verdict itself.
fn exit_code(verdict: &Verdict, strict: bool) -> i32 {
    match verdict.classification {
        Classification::Blocked => 1,
        Classification::ReadyWithWarnings if strict => 1,
        _ => 0,
    }
}

/// Prints an audit failure and exits with the environment-error code.
fn exit_audit_error(err: AuditError) -> ! {
    eprintln!("Error: {err}");
    if matches!(err, AuditError::Contract(_)) {
        eprintln!("This is a bug in skill-auditor; please report it.");
    }
    std::process::exit(2);
}

/// Runs the LLM collaborator against a finished report. Failures degrade
/// to a categorized hint on stderr and never change the exit code.
fn run_analysis(report: &AuditReport, config: &config::Config, format: &output::OutputFormat) {
    if !matches!(format, output::OutputFormat::Pretty) {
        eprintln!("Note: --explain is skipped for machine-readable formats.");
        return;
    }

    let analyzer = ClaudeCliAnalyzer::new(config);
    eprintln!("Running {} analysis...", analyzer.name());

    match analyzer.analyze(report) {
        Ok(text) => {
            println!("{}", "Analysis".bold().underline());
            println!("{text}");
        }
        Err(e) => {
            eprintln!("{} {}", "Analysis failed:".yellow().bold(), e);
            eprintln!("  {}", e.guidance());
        }
    }
}

/// Returns immediate child directories of `path` that contain a `SKILL.md` file,
/// sorted alphabetically by directory name.
fn find_skill_dirs(path: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return vec![];
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| p.join("SKILL.md").exists())
        .collect();

    dirs.sort();
    dirs
}

/// Renders a compact summary table after all individual skill reports have been printed.
fn format_collection_summary(
    collection_path: &Path,
    outcomes: &[(PathBuf, Result<AuditReport, AuditError>)],
) -> String {
    let mut out = String::new();
    let separator = "─".repeat(54);

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        format!(
            "  Collection Summary: {}  ({} skills)",
            collection_path.display(),
            outcomes.len()
        )
        .bold()
        .underline()
    ));
    out.push_str(&format!("{}\n", separator.dimmed()));

    let mut n_blocked = 0usize;
    let mut n_warned = 0usize;
    let mut n_ready = 0usize;
    let mut n_error = 0usize;

    for (dir, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                let status_str = match report.verdict.classification {
                    Classification::Ready => {
                        n_ready += 1;
                        "READY   ".green().bold().to_string()
                    }
                    Classification::ReadyWithWarnings => {
                        n_warned += 1;
                        "WARNINGS".yellow().bold().to_string()
                    }
                    Classification::Blocked => {
                        n_blocked += 1;
                        "BLOCKED ".red().bold().to_string()
                    }
                };

                out.push_str(&format!(
                    "  {name:<22} {status}  {b}b {w}w\n",
                    name = report.skill(),
                    status = status_str,
                    b = report.verdict.blockers.len(),
                    w = report.verdict.warnings.len(),
                ));
            }
            Err(_) => {
                n_error += 1;
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| dir.display().to_string());
                out.push_str(&format!(
                    "  {name:<22} {status}  (see error above)\n",
                    status = "ERROR   ".red().bold(),
                ));
            }
        }
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    out.push_str(&format!(
        "  Total: {}  {}  {}",
        format!("{} blocked", n_blocked).red().bold(),
        format!("{} warnings", n_warned).yellow().bold(),
        format!("{} ready", n_ready).green().bold(),
    ));
    if n_error > 0 {
        out.push_str(&format!("  {}", format!("{} errors", n_error).red().bold()));
    }
    out.push('\n');

    out
}
