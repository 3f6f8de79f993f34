//! wsfix Core - whitespace normalization for source trees
//!
//! Fixes line endings, trailing whitespace and end-of-file newlines in
//! place, and warns about space-before-tab indentation.
//!
//! # Architecture
//!
//! ```text
//! patterns → Driver → Processor → Classifier (probe, header, full)
//!                        ↓
//!                     Normalizer → rewrite + Reporter events
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same bytes always normalize the same way
//! - **Idempotent**: a second run over fixed files changes nothing
//! - **All or nothing**: a file is left byte-identical or fully rewritten
//! - **Bounded**: files above [`Limits::max_file_size`] are never read

pub mod classifier;
pub mod driver;
pub mod error;
pub mod normalizer;
pub mod processor;
pub mod report;

pub use driver::{run, RunTotals};
pub use error::{Error, Result};
pub use normalizer::{normalize, ChangeReport, Normalized};
pub use processor::{process_file, FileOutcome};
pub use report::Reporter;

/// Read limits applied to every file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Bytes sampled from the start of a file before a full read
    pub header_size: usize,
    /// Files larger than this are skipped
    pub max_file_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            header_size: 4096,
            max_file_size: 10_000_000,
        }
    }
}
