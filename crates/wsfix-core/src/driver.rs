//! Run driver — expands patterns, walks trees, accumulates totals
//!
//! Files are processed one at a time, in a deterministic order. Totals are
//! returned by value; nothing is kept between runs.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::processor::{self, FileOutcome};
use crate::report::Reporter;
use crate::{Error, Limits, Result};

/// Version-control metadata directories never descended into
pub const VCS_DIRS: [&str; 2] = [".git", ".hg"];

/// Accumulated results of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub files_changed: usize,
    pub fixes: usize,
    pub warnings: usize,
}

impl RunTotals {
    pub fn record(&mut self, outcome: FileOutcome) {
        self.fixes += outcome.fixes;
        if outcome.changed {
            self.files_changed += 1;
        }
        if outcome.warned {
            self.warnings += 1;
        }
    }

    /// Nothing was changed and nothing was warned about
    pub fn is_clean(&self) -> bool {
        self.files_changed == 0 && self.warnings == 0
    }
}

/// Process every file named by `patterns`
///
/// # Errors
/// Returns `Pattern` for a malformed glob. Unreadable files and
/// directories are logged and skipped.
pub fn run(patterns: &[String], limits: &Limits, reporter: &mut dyn Reporter) -> Result<RunTotals> {
    let mut totals = RunTotals::default();
    for path in collect_files(patterns)? {
        totals.record(processor::process_file(&path, limits, reporter));
    }
    Ok(totals)
}

/// Expand patterns and walk directories into a sorted, de-duplicated list
pub fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };
        let matches = glob::glob_with(pattern, options).map_err(|source| Error::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        let literal = !pattern.contains(['*', '?', '[']);

        let mut matched = false;
        for entry in matches {
            matched = true;
            match entry {
                Ok(path) => add_path(&path, literal, &mut files),
                Err(e) => tracing::warn!(error = %e, "unreadable match"),
            }
        }
        if !matched {
            tracing::warn!(pattern = %pattern, "pattern matched no files");
        }
    }
    Ok(files.into_iter().collect())
}

/// Symlinks are never followed, here or in the walk. A file named
/// literally is taken even inside a VCS directory; glob matches and
/// walk roots are not.
fn add_path(path: &Path, literal: bool, files: &mut BTreeSet<PathBuf>) {
    let file_type = match path.symlink_metadata() {
        Ok(meta) => meta.file_type(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot stat");
            return;
        }
    };
    if file_type.is_file() {
        if literal || !in_vcs_dir(path) {
            files.insert(path.to_path_buf());
        }
        return;
    }
    if !file_type.is_dir() || in_vcs_dir(path) {
        tracing::debug!(path = %path.display(), "not walked");
        return;
    }
    for path in walk_dir(path) {
        files.insert(path);
    }
}

/// Regular files beneath `root`, skipping VCS metadata directories
pub fn walk_dir(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_vcs_dir(entry.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(source) => {
                let path = source.path().unwrap_or(root).to_path_buf();
                let err = Error::Walk { path, source };
                tracing::warn!(error = %err, "skipping entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// True if the final component of `path` is a VCS metadata directory.
/// Pruning at this level keeps every path below it out of the walk.
fn is_vcs_dir(path: &Path) -> bool {
    matches!(
        path.components().next_back(),
        Some(Component::Normal(name)) if VCS_DIRS.iter().any(|vcs| name == *vcs)
    )
}

/// True if any component of `path` is a VCS metadata directory
fn in_vcs_dir(path: &Path) -> bool {
    path.components().any(|c| is_vcs_dir(Path::new(c.as_os_str())))
}
