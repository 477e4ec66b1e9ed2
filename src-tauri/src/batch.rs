// Batch runner: iterate files, extract, match, accumulate one row per file.
// Per-file failures become error rows and never abort the batch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::extract::{self, DocumentKind};
use crate::matcher::{self, KeywordMatch};

/// Explicit runner configuration; nothing is read from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfig {
    /// Maximum snippet length in chars for match detail rows.
    pub snippet_length: usize,
    /// Whether to collect per-paragraph detail rows in addition to counts.
    pub collect_matches: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            snippet_length: 200,
            collect_matches: true,
        }
    }
}

/// One result-table row: a single input file's matches or its failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: String,
    pub file_name: String,
    pub kind: Option<DocumentKind>,
    pub counts: BTreeMap<String, usize>,
    pub total_matches: usize,
    pub matches: Vec<KeywordMatch>,
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub keywords: Vec<String>,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn matched_file_count(&self) -> usize {
        self.files.iter().filter(|f| f.total_matches > 0).count()
    }

    pub fn failed_file_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_failed()).count()
    }
}

/// Run one batch over `paths` with an immutable keyword list. Synchronous
/// and single-threaded; callers that need a responsive UI offload the whole
/// call to a background task.
pub fn run_batch(paths: &[PathBuf], keywords: &[String], config: &BatchConfig) -> BatchReport {
    let started_at = Utc::now();
    info!(files = paths.len(), keywords = keywords.len(), "starting batch run");

    let files = paths
        .iter()
        .map(|path| analyze_file(path, keywords, config))
        .collect::<Vec<_>>();

    info!(
        matched = files.iter().filter(|f| f.total_matches > 0).count(),
        failed = files.iter().filter(|f| f.is_failed()).count(),
        "batch run finished"
    );

    BatchReport {
        started_at,
        keywords: keywords.to_vec(),
        files,
    }
}

fn analyze_file(path: &Path, keywords: &[String], config: &BatchConfig) -> FileReport {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();
    let kind = DocumentKind::from_path(path);

    match extract::extract_text(path) {
        Ok(pages) => {
            let text = extract::flatten(&pages);
            let counts = matcher::match_counts(&text, keywords);
            let total_matches = counts.values().sum();
            let matches = if config.collect_matches {
                matcher::find_matches(&pages, keywords, config.snippet_length)
            } else {
                Vec::new()
            };
            info!(file = %file_name, total_matches, "analyzed document");
            FileReport {
                path: path.to_string_lossy().to_string(),
                file_name,
                kind,
                counts,
                total_matches,
                matches,
                error: None,
            }
        }
        Err(err) => {
            warn!(file = %file_name, error = %err, "failed to analyze document");
            FileReport {
                path: path.to_string_lossy().to_string(),
                file_name,
                kind,
                counts: zero_counts(keywords),
                total_matches: 0,
                matches: Vec::new(),
                error: Some(err.to_string()),
            }
        }
    }
}

fn zero_counts(keywords: &[String]) -> BTreeMap<String, usize> {
    keywords.iter().map(|kw| (kw.clone(), 0)).collect()
}

/// Expand a mixed list of files and directories into supported document
/// paths; directories are walked recursively, entries sorted for
/// reproducible batch order.
pub fn collect_document_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .filter(|e| DocumentKind::from_path(e.path()).is_some())
                .map(|e| e.path().to_path_buf())
                .collect();
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    paths
}
