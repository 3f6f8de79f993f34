//! Reporting seam between the processor and whatever renders its output
//!
//! The core never prints. Each observable event of a run is handed to a
//! [`Reporter`]; the CLI renders them to the console.

use std::io;
use std::path::Path;

use crate::normalizer::ChangeReport;

/// Receives per-file events in the order they happen
pub trait Reporter {
    /// The file passed every gate and is about to be normalized
    fn checking(&mut self, path: &Path);

    /// The normalized text was written back
    fn fixed(&mut self, path: &Path, report: &ChangeReport);

    /// The normalized text differed but could not be written
    fn write_failed(&mut self, path: &Path, error: &io::Error);

    /// The normalized text still contains a space followed by a tab
    fn space_before_tab(&mut self, path: &Path);
}
