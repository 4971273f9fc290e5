//! Report directory persistence: write/read/verify a run report on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   report.json          canonical JSON, full report (timing included)
//!   search_graph.json    canonical JSON audit graph (only when recorded)
//!   report_digest.txt    ASCII digest string (e.g. "sha256:...")
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing `report.json` or `report_digest.txt` → error
//! - Report names a graph digest but `search_graph.json` is absent → error
//! - Any other file present → error
//! - Non-canonical JSON → error
//! - Stored digest or graph digest differs from the recomputed one → error

use std::collections::BTreeSet;
use std::path::Path;

use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{
    canonical_hash, ContentHash, DOMAIN_RUN_REPORT, DOMAIN_SEARCH_GRAPH,
};
use lodestar_search::graph::SearchGraph;

use crate::report::{digest_basis_of, RunReport};

pub const REPORT_FILENAME: &str = "report.json";
pub const GRAPH_FILENAME: &str = "search_graph.json";
pub const DIGEST_FILENAME: &str = "report_digest.txt";

/// Every filename a report directory may contain.
const KNOWN_FILENAMES: &[&str] = &[REPORT_FILENAME, GRAPH_FILENAME, DIGEST_FILENAME];

/// Error writing or reading a report directory.
#[derive(Debug)]
pub enum ReportDirError {
    /// I/O error.
    Io { detail: String },
    /// Canonical JSON serialization failed.
    Canon(CanonError),
    /// A required file is missing.
    MissingFile { filename: String },
    /// A file is not valid JSON.
    Parse { filename: String, detail: String },
    /// A file parses but its bytes are not in canonical form.
    NonCanonical { filename: String },
    /// A file the layout does not allow.
    ExtraFile { name: String },
    /// `report_digest.txt` does not match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
    /// `search_graph.json` does not hash to the report's `graph_digest`.
    GraphDigestMismatch { declared: String, recomputed: String },
}

impl std::fmt::Display for ReportDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::Parse { filename, detail } => write!(f, "{filename}: parse error: {detail}"),
            Self::NonCanonical { filename } => write!(f, "{filename}: not canonical JSON"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
            Self::GraphDigestMismatch {
                declared,
                recomputed,
            } => write!(
                f,
                "graph digest mismatch: declared={declared}, recomputed={recomputed}"
            ),
        }
    }
}

impl std::error::Error for ReportDirError {}

impl From<CanonError> for ReportDirError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// A report directory after verification.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    /// Parsed `report.json`.
    pub report: serde_json::Value,
    /// Raw `search_graph.json`, if present.
    pub graph: Option<Vec<u8>>,
    /// The verified report digest.
    pub digest: ContentHash,
}

/// Write `report` (and `graph`, when given) into `dir`.
///
/// Creates the directory if it does not exist. Returns the report digest.
///
/// # Errors
///
/// Returns [`ReportDirError`] on I/O failure or canonical JSON error.
pub fn write_report_dir(
    report: &RunReport,
    graph: Option<&SearchGraph>,
    dir: &Path,
) -> Result<ContentHash, ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let graph_path = dir.join(GRAPH_FILENAME);
    match graph {
        Some(graph) => write_atomic(&graph_path, &graph.to_canonical_json_bytes()?)?,
        // A graph left by an earlier write would no longer match the report.
        None if graph_path.exists() => {
            std::fs::remove_file(&graph_path).map_err(|e| ReportDirError::Io {
                detail: format!("remove {}: {e}", graph_path.display()),
            })?;
        }
        None => {}
    }
    let digest = report.digest()?;
    write_atomic(dir.join(REPORT_FILENAME), &report.to_canonical_json_bytes()?)?;
    write_atomic(dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;

    Ok(digest)
}

/// Read and verify a report directory.
///
/// # Errors
///
/// Returns [`ReportDirError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<LoadedReport, ReportDirError> {
    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let report = parse_canonical(REPORT_FILENAME, &report_bytes)?;

    for filename in list_files(dir)? {
        if !KNOWN_FILENAMES.contains(&filename.as_str()) {
            return Err(ReportDirError::ExtraFile { name: filename });
        }
    }

    let recomputed = canonical_hash(DOMAIN_RUN_REPORT, &digest_basis_of(&report)?);
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let graph = match report["graph_digest"].as_str() {
        Some(declared) => {
            let bytes = read_required(dir, GRAPH_FILENAME)?;
            parse_canonical(GRAPH_FILENAME, &bytes)?;
            let graph_hash = canonical_hash(DOMAIN_SEARCH_GRAPH, &bytes);
            if graph_hash.as_str() != declared {
                return Err(ReportDirError::GraphDigestMismatch {
                    declared: declared.to_string(),
                    recomputed: graph_hash.as_str().to_string(),
                });
            }
            Some(bytes)
        }
        None => {
            if dir.join(GRAPH_FILENAME).exists() {
                return Err(ReportDirError::ExtraFile {
                    name: GRAPH_FILENAME.to_string(),
                });
            }
            None
        }
    };

    Ok(LoadedReport {
        report,
        graph,
        digest: recomputed,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write bytes to a path via temp file + rename (best-effort atomicity on Unix).
fn write_atomic(path: impl AsRef<Path>, content: &[u8]) -> Result<(), ReportDirError> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| ReportDirError::Io {
        detail: "no parent directory".into(),
    })?;

    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| ReportDirError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })?;

    Ok(())
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirError::MissingFile {
        filename: filename.to_string(),
    })
}

/// Parse `bytes` as JSON and require them to be their own canonical form.
fn parse_canonical(filename: &str, bytes: &[u8]) -> Result<serde_json::Value, ReportDirError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ReportDirError::Parse {
            filename: filename.to_string(),
            detail: format!("{e}"),
        })?;
    if canonical_json_bytes(&value)? != bytes {
        return Err(ReportDirError::NonCanonical {
            filename: filename.to_string(),
        });
    }
    Ok(value)
}

/// Regular files in `dir`, skipping temp files left by `write_atomic`.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirError> {
    let mut files = BTreeSet::new();
    let entries = std::fs::read_dir(dir).map_err(|e| ReportDirError::Io {
        detail: format!("read_dir: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ReportDirError::Io {
            detail: format!("dir entry: {e}"),
        })?;
        let file_type = entry.file_type().map_err(|e| ReportDirError::Io {
            detail: format!("file_type: {e}"),
        })?;
        if file_type.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(".tmp_") {
                    files.insert(name.to_string());
                }
            }
        }
    }

    Ok(files)
}
