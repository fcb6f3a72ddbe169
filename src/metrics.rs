//! Metrics extraction: the fact-gathering half of an audit.
//!
//! [`extract_metrics`] turns a skill directory into a [`SkillMetrics`] fact
//! record describing file presence, frontmatter structure, and size. It is
//! the only component that touches the filesystem, it never writes, and it
//! fails loudly with a typed [`ExtractError`] instead of defaulting on I/O
//! anomalies. Rule logic lives elsewhere: this module measures, the
//! [`rules`](crate::rules) module judges.
//!
//! # What is measured
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `skill_name` | frontmatter `name`, falling back to the directory name |
//! | `line_count` | newline-delimited lines in `SKILL.md` |
//! | `yaml_delimiters` | fence lines in the leading frontmatter block (0, 1, or 2) |
//! | `has_name` / `has_description` | key present with a non-empty value |
//! | `forbidden_files` | denylisted sibling names, directory-listing order |
//!
//! # Frontmatter scanning
//!
//! Only the leading block is scanned: the opening fence must be the first
//! line of the file, and the scan stops at the closing fence. Fence-looking
//! lines later in the body are body text, not delimiters. Keys are matched
//! literally and case-sensitively at the top level, the same way a skill
//! runtime reads them; an unclosed block yields no keys.

use crate::config::{Policy, EXPECTED_FENCE_COUNT, FRONTMATTER_FENCE};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the primary file every skill bundle must carry.
pub const PRIMARY_FILE: &str = "SKILL.md";

/// The fact record produced by one extraction run.
///
/// Constructed once per audit, never mutated afterwards, and consumed by the
/// structure validator and the rule evaluator. Serializes to the structured
/// document the external analysis collaborator receives.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkillMetrics {
    /// Declared frontmatter `name`, or the directory base name.
    pub skill_name: String,
    /// Number of text lines in `SKILL.md`. A trailing newline does not add
    /// a phantom line.
    pub line_count: usize,
    /// Fence lines found in the leading frontmatter block. Well-formed
    /// frontmatter has exactly [`EXPECTED_FENCE_COUNT`].
    pub yaml_delimiters: usize,
    /// `name` key present with a non-empty value.
    pub has_name: bool,
    /// `description` key present with a non-empty value.
    pub has_description: bool,
    /// Denylisted sibling filenames, in directory-listing order.
    pub forbidden_files: Vec<String>,
}

/// Failure modes of [`extract_metrics`].
///
/// Each variant is distinct so the caller can give guidance matched to the
/// failure instead of a generic message. Every variant names the offending
/// path.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The mandatory primary file is absent.
    #[error("SKILL.md not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// A file or directory could not be read due to permissions.
    #[error("permission denied reading {}", .path.display())]
    Permission { path: PathBuf },

    /// The primary file's bytes are not valid UTF-8.
    #[error("{} is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    /// Any other local I/O fault; treated as possibly transient.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Extracts a [`SkillMetrics`] fact record from a skill directory.
///
/// Reads `SKILL.md` as UTF-8, scans its leading frontmatter block, and lists
/// the directory's immediate entries against the policy denylist. The
/// extraction is deterministic: an unchanged directory yields an identical
/// fact record on every call.
///
/// # Errors
///
/// - [`ExtractError::NotFound`] when `SKILL.md` is absent.
/// - [`ExtractError::Permission`] when the file or directory is unreadable.
/// - [`ExtractError::Encoding`] when the file is not valid UTF-8.
/// - [`ExtractError::Io`] for any other local I/O fault.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use skill_auditor::config::Policy;
/// use skill_auditor::metrics::extract_metrics;
///
/// let metrics = extract_metrics(Path::new("./my-skill"), &Policy::default())?;
/// println!("{} lines", metrics.line_count);
/// # Ok::<(), skill_auditor::metrics::ExtractError>(())
/// ```
pub fn extract_metrics(path: &Path, policy: &Policy) -> Result<SkillMetrics, ExtractError> {
    let skill_md = path.join(PRIMARY_FILE);
    let content = read_primary_file(&skill_md)?;

    let line_count = content.lines().count();
    let scan = scan_frontmatter(&content);
    let forbidden_files = scan_forbidden_siblings(path, policy)?;

    let skill_name = match scan.name {
        Some(ref name) => name.clone(),
        None => directory_name(path),
    };

    Ok(SkillMetrics {
        skill_name,
        line_count,
        yaml_delimiters: scan.fence_count,
        has_name: scan.name.is_some(),
        has_description: scan.description.is_some(),
        forbidden_files,
    })
}

/// Reads `SKILL.md` as UTF-8, mapping each failure mode to its own variant.
///
/// Bytes are read first and decoded explicitly so that an undecodable file
/// is reported as [`ExtractError::Encoding`] rather than folded into a
/// generic read failure.
fn read_primary_file(skill_md: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(skill_md).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound {
            path: skill_md.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => ExtractError::Permission {
            path: skill_md.to_path_buf(),
        },
        _ => ExtractError::Io {
            path: skill_md.to_path_buf(),
            source: e,
        },
    })?;

    String::from_utf8(bytes).map_err(|_| ExtractError::Encoding {
        path: skill_md.to_path_buf(),
    })
}

/// Result of scanning the leading frontmatter block.
struct FrontmatterScan {
    /// Fence lines seen: 0 (no block), 1 (unclosed), or 2 (closed).
    fence_count: usize,
    /// Non-empty `name` value, only when the block is closed.
    name: Option<String>,
    /// Non-empty `description` value, only when the block is closed.
    description: Option<String>,
}

/// Scans the leading frontmatter block of `content`.
///
/// The opening fence must be the very first line; without it there is no
/// block and nothing further is scanned. The scan stops at the closing
/// fence, so later fence-looking lines in the body are never counted.
fn scan_frontmatter(content: &str) -> FrontmatterScan {
    let mut scan = FrontmatterScan {
        fence_count: 0,
        name: None,
        description: None,
    };

    let mut lines = content.lines();
    match lines.next() {
        Some(first) if is_fence(first) => scan.fence_count = 1,
        _ => return scan,
    }

    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    for line in lines {
        if is_fence(line) {
            scan.fence_count = EXPECTED_FENCE_COUNT;
            break;
        }
        if let Some((key, value)) = parse_kv(line) {
            match key {
                "name" => name = Some(value.to_string()),
                "description" => description = Some(value.to_string()),
                _ => {}
            }
        }
    }

    // Keys only count inside a closed block. With a single fence the rest of
    // the file is body text, and body prose must not be read as metadata.
    if scan.fence_count == EXPECTED_FENCE_COUNT {
        scan.name = name;
        scan.description = description;
    }
    scan
}

/// A line consisting solely of the fence token, modulo surrounding whitespace.
fn is_fence(line: &str) -> bool {
    line.trim() == FRONTMATTER_FENCE
}

/// Splits a top-level `key: value` line into `(key, value)`.
///
/// Indented lines are nested values or continuations and are skipped. A key
/// with an empty value is treated as absent, which is what the flag
/// semantics of [`SkillMetrics`] require.
fn parse_kv(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let (key, after) = line.split_once(':')?;
    let key = key.trim();
    let value = after.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Lists the directory's immediate entries and collects denylisted names.
///
/// Non-recursive: only siblings of `SKILL.md` count, and matching is exact
/// and case-sensitive. Yield order of the directory listing is preserved so
/// findings report names the way the listing produced them.
fn scan_forbidden_siblings(dir: &Path, policy: &Policy) -> Result<Vec<String>, ExtractError> {
    let entries = std::fs::read_dir(dir).map_err(|e| classify_dir_error(e, dir))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| classify_dir_error(e, dir))?;
        let file_name = entry.file_name();
        // A non-UTF-8 name can never equal a denylist entry.
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if policy.forbidden_files.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    Ok(found)
}

/// Maps a directory-listing failure onto the extraction taxonomy.
fn classify_dir_error(e: io::Error, dir: &Path) -> ExtractError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => ExtractError::Permission {
            path: dir.to_path_buf(),
        },
        _ => ExtractError::Io {
            path: dir.to_path_buf(),
            source: e,
        },
    }
}

/// Returns the last path component, or `"unknown"` when the path has no
/// file-name segment (e.g. `/`).
fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
