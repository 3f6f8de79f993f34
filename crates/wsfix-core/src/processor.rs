//! File processor — gates, normalizes and rewrites one file
//!
//! # Steps
//!
//! 1. binary probe
//! 2. size cap
//! 3. header sample, classified
//! 4. full read, classified again (only when the file outgrows the header)
//! 5. normalize, rewrite in place when the text changed
//!
//! Every failure before step 5 is a silent skip: the file contributes
//! zero fixes and nothing is reported. Write failures are reported and the
//! run continues.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::classifier::{self, EncodingVerdict, FileKind, Sample};
use crate::normalizer;
use crate::report::Reporter;
use crate::{Error, Limits, Result};

/// What processing one file amounted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Fixes computed, whether or not the write succeeded
    pub fixes: usize,
    /// The normalized text was written back
    pub changed: bool,
    /// A space-before-tab warning was emitted
    pub warned: bool,
}

/// Why a file was left alone without being checked
#[derive(Debug, thiserror::Error)]
pub enum Skip {
    #[error("binary file")]
    Binary,
    #[error("not a readable regular file")]
    Unreadable,
    #[error("{size} bytes exceeds the size limit")]
    Oversized { size: u64 },
    /// Open/read failure or short read
    #[error(transparent)]
    Read(Error),
    #[error("not ASCII/UTF-8 text ({sample:?} sample)")]
    NotText { sample: Sample },
}

/// Process one file. Never fails: problems become skips or reports.
pub fn process_file(path: &Path, limits: &Limits, reporter: &mut dyn Reporter) -> FileOutcome {
    let original = match load_text(path, limits) {
        Ok(text) => text,
        Err(skip) => {
            tracing::debug!(path = %path.display(), reason = %skip, "skipped");
            return FileOutcome::default();
        }
    };

    reporter.checking(path);
    let normalized = normalizer::normalize(&original);
    let report = normalized.report;
    let mut outcome = FileOutcome {
        fixes: report.fixes(),
        ..FileOutcome::default()
    };

    if normalized.text != original {
        match write_file(path, normalized.text.as_bytes()) {
            Ok(()) => {
                reporter.fixed(path, &report);
                outcome.changed = true;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "write failed");
                reporter.write_failed(path, &e);
            }
        }
    }

    if report.space_before_tab {
        reporter.space_before_tab(path);
        outcome.warned = true;
    }

    outcome
}

/// Run every gate and return the file contents as text
pub fn load_text(path: &Path, limits: &Limits) -> std::result::Result<String, Skip> {
    match classifier::probe_file(path) {
        FileKind::Text => {}
        FileKind::Binary => return Err(Skip::Binary),
        FileKind::Unreadable => return Err(Skip::Unreadable),
    }

    let size = fs::metadata(path).map_err(|_| Skip::Unreadable)?.len();
    if size > limits.max_file_size {
        return Err(Skip::Oversized { size });
    }
    // size <= max_file_size, which fits in memory by construction
    let size = usize::try_from(size).map_err(|_| Skip::Oversized { size })?;

    let header_len = size.min(limits.header_size);
    let header = read_prefix(path, header_len).map_err(Skip::Read)?;
    let header_sample = if size > limits.header_size {
        Sample::Prefix
    } else {
        Sample::Whole
    };
    match classifier::classify(&header, header_sample) {
        EncodingVerdict::Confirmed(encoding) => {
            tracing::debug!(path = %path.display(), encoding = encoding.name(), "header confirmed");
        }
        EncodingVerdict::NotConfirmed => {
            return Err(Skip::NotText {
                sample: header_sample,
            });
        }
    }

    let contents = if size > limits.header_size {
        drop(header);
        let full = read_all(path, size).map_err(Skip::Read)?;
        if full.len() as u64 > limits.max_file_size {
            return Err(Skip::Oversized {
                size: full.len() as u64,
            });
        }
        if let EncodingVerdict::NotConfirmed = classifier::classify(&full, Sample::Whole) {
            return Err(Skip::NotText {
                sample: Sample::Whole,
            });
        }
        full
    } else {
        header
    };

    String::from_utf8(contents).map_err(|_| Skip::NotText {
        sample: Sample::Whole,
    })
}

/// Read exactly `len` bytes from the start of `path`
fn read_prefix(path: &Path, len: usize) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = Vec::with_capacity(len);
    file.take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if buf.len() < len {
        return Err(Error::ShortRead {
            path: path.to_path_buf(),
            expected: len,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

/// Read `path` to EOF. Only fewer than `min_len` bytes is a short read;
/// a file that grew since it was sized is read whole.
fn read_all(path: &Path, min_len: usize) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = Vec::with_capacity(min_len);
    file.read_to_end(&mut buf).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if buf.len() < min_len {
        return Err(Error::ShortRead {
            path: path.to_path_buf(),
            expected: min_len,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

/// Truncate `path` and write `bytes` in its place
fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}
