//! Text classifier — decides whether bytes are ASCII/UTF-8 text
//!
//! Two gates are applied before a file is normalized:
//!
//! - [`probe_file`]: a cheap file-level probe (regular file, no NUL byte in
//!   the first block). Runs before any sample is read for classification.
//! - [`classify`]: a strict decode check over a sample. Only ASCII and
//!   UTF-8 are accepted; anything else is `NotConfirmed`.
//!
//! Guarantees:
//! - Deterministic: same bytes always produce the same verdict
//! - No side effects in `classify`

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes inspected by the binary probe
pub const PROBE_BLOCK_SIZE: usize = 8000;

/// Encodings the normalizer is willing to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Ascii,
    Utf8,
}

impl Encoding {
    /// Canonical encoding name
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Utf8 => "utf-8",
        }
    }
}

/// Result of classifying a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingVerdict {
    Confirmed(Encoding),
    NotConfirmed,
}

impl EncodingVerdict {
    pub fn is_confirmed(self) -> bool {
        matches!(self, EncodingVerdict::Confirmed(_))
    }
}

/// How much of the file a sample covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A bounded header; may end inside a multi-byte sequence
    Prefix,
    /// The entire file
    Whole,
}

/// Outcome of the file-level probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Binary,
    /// Not a regular file, or could not be opened
    Unreadable,
}

/// Classify a sample as confirmed ASCII/UTF-8 text or not
pub fn classify(buffer: &[u8], sample: Sample) -> EncodingVerdict {
    if buffer.is_empty() {
        return EncodingVerdict::NotConfirmed;
    }
    if buffer.is_ascii() {
        return EncodingVerdict::Confirmed(Encoding::Ascii);
    }
    match std::str::from_utf8(buffer) {
        Ok(_) => EncodingVerdict::Confirmed(Encoding::Utf8),
        // error_len() == None: input ended mid-sequence, expected for a header cut
        Err(e) if sample == Sample::Prefix && e.error_len().is_none() && e.valid_up_to() > 0 => {
            EncodingVerdict::Confirmed(Encoding::Utf8)
        }
        Err(_) => EncodingVerdict::NotConfirmed,
    }
}

/// Fast file-level binary/text probe
pub fn probe_file(path: &Path) -> FileKind {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "probe: cannot open");
            return FileKind::Unreadable;
        }
    };
    match file.metadata() {
        Ok(meta) if meta.is_file() => {}
        _ => return FileKind::Unreadable,
    }

    let mut block = Vec::with_capacity(PROBE_BLOCK_SIZE);
    if let Err(e) = file.take(PROBE_BLOCK_SIZE as u64).read_to_end(&mut block) {
        tracing::debug!(path = %path.display(), error = %e, "probe: read failed");
        return FileKind::Unreadable;
    }

    if block.contains(&0) {
        FileKind::Binary
    } else {
        FileKind::Text
    }
}
