//! Directory scanner
//!
//! Depth-first post-order walk producing one JSON line per entry. A
//! directory's line is appended only after its subtree has been
//! enumerated, so its content-bearing status is known before emission.
//! Conventions (fixed and tested): the scanned root is depth 0 and is
//! emitted; an entry at depth d is emitted or visited iff d <= max_depth.

use super::RawResult;
use chrono::{DateTime, Local};
use codescout_core::Result;
use globset::{Glob, GlobMatcher};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Maximum entry depth; `None` means unbounded.
    pub max_depth: Option<u32>,
    /// Exact directory names pruned before recursion.
    pub exclude_dirs: Vec<String>,
    /// Glob on file names; `None` admits every file.
    pub file_filter: Option<String>,
    /// Emit a directory only if it carries at least one qualifying file or
    /// one emitted subdirectory.
    pub hide_empty_folder: bool,
}

#[derive(Serialize)]
struct DirEntryLine<'a> {
    name: &'a str,
    path: String,
    #[serde(rename = "type")]
    entry_type: &'static str,
    size: u64,
    modified: String,
}

fn format_mtime(meta: &fs::Metadata) -> String {
    meta.modified()
        .map(|t| DateTime::<Local>::from(t).to_rfc3339())
        .unwrap_or_default()
}

fn entry_line(path: &Path, entry_type: &'static str, size: u64, modified: String) -> Option<String> {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let line = DirEntryLine {
        name: &name,
        path: path.to_string_lossy().into_owned(),
        entry_type,
        size,
        modified,
    };
    serde_json::to_string(&line).ok()
}

/// Scan `root` with the given options. Individual unreadable entries are
/// logged and skipped; the scan itself never fails.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<RawResult> {
    let max_depth = options.max_depth.unwrap_or(u32::MAX);
    let matcher = match &options.file_filter {
        Some(pattern) => Some(
            Glob::new(pattern)
                .map_err(|e| codescout_core::Error::invalid_args(format!("invalid file_filter: {}", e)))?
                .compile_matcher(),
        ),
        None => None,
    };

    info!(
        "directory scan: path={}, max_depth={}, filter={:?}",
        root.display(),
        max_depth,
        options.file_filter
    );

    let mut entries = Vec::new();
    scan_dir(root, 0, max_depth, options, matcher.as_ref(), &mut entries);
    Ok(RawResult::new(entries))
}

/// Recursive helper; returns true if the directory contributed content
/// (a qualifying file or an emitted subdirectory), which propagates upward
/// for `hide_empty_folder`.
fn scan_dir(
    path: &Path,
    depth: u32,
    max_depth: u32,
    options: &ScanOptions,
    matcher: Option<&GlobMatcher>,
    out: &mut Vec<String>,
) -> bool {
    let read = match fs::read_dir(path) {
        Ok(read) => read,
        Err(e) => {
            warn!("cannot list {}: {}", path.display(), e);
            return false;
        }
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in read {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("unreadable entry under {}: {}", path.display(), e);
                continue;
            }
        };
        // Symlinked directories are treated as files: never followed.
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !options.exclude_dirs.iter().any(|ex| *ex == name) {
                dirs.push(entry.path());
            }
        } else {
            files.push(entry.path());
        }
    }
    // Filesystem order is arbitrary; sort for deterministic output.
    files.sort();
    dirs.sort();

    let mut has_content = false;
    let child_depth = depth + 1;

    if child_depth <= max_depth {
        for file in &files {
            let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            if matcher.map_or(true, |m| m.is_match(name.as_ref())) {
                match fs::metadata(file) {
                    Ok(meta) => {
                        if let Some(line) = entry_line(file, "file", meta.len(), format_mtime(&meta)) {
                            out.push(line);
                            has_content = true;
                        }
                    }
                    Err(e) => warn!("cannot stat {}: {}", file.display(), e),
                }
            }
        }

        for dir in &dirs {
            if scan_dir(dir, child_depth, max_depth, options, matcher, out) {
                has_content = true;
            }
        }
    }

    if !options.hide_empty_folder || has_content {
        match fs::metadata(path) {
            Ok(meta) => {
                if let Some(line) = entry_line(path, "directory", 0, format_mtime(&meta)) {
                    out.push(line);
                    return true;
                }
            }
            Err(e) => warn!("cannot stat {}: {}", path.display(), e),
        }
    }
    has_content
}
