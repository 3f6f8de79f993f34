//! Console rendering of run events and the final summary

use std::io;
use std::path::Path;

use colored::Colorize;
use wsfix_core::{ChangeReport, Reporter, RunTotals};

/// Prints every event to stdout as it happens
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn checking(&mut self, path: &Path) {
        println!("Checking {}", path.display());
    }

    fn fixed(&mut self, _path: &Path, report: &ChangeReport) {
        for line in fix_lines(report) {
            println!("  {}", line);
        }
    }

    fn write_failed(&mut self, path: &Path, error: &io::Error) {
        println!(
            "  {} could not fix {}: {}",
            "warning:".yellow().bold(),
            path.display(),
            error
        );
    }

    fn space_before_tab(&mut self, path: &Path) {
        println!(
            "  {} {} contains a space before a tab",
            "warning:".yellow().bold(),
            path.display()
        );
    }
}

/// One line per nonzero fix category, in pipeline order
pub fn fix_lines(report: &ChangeReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.crlf > 0 {
        lines.push(format!("Fixed {}", plural(report.crlf, "CRLF line ending")));
    }
    if report.cr > 0 {
        lines.push(format!("Fixed {}", plural(report.cr, "CR line ending")));
    }
    if report.trailing_whitespace > 0 {
        lines.push(format!(
            "Fixed {} with trailing whitespace",
            plural(report.trailing_whitespace, "line")
        ));
    }
    if report.missing_final_newline {
        lines.push("Fixed missing newline at end of file".to_string());
    }
    if report.trailing_blank_lines {
        lines.push("Fixed multiple newlines at end of file".to_string());
    }
    lines
}

/// Summary lines for the end of a run
pub fn summary_lines(totals: &RunTotals) -> Vec<String> {
    let mut lines = Vec::new();
    if totals.is_clean() {
        lines.push("No problems found.".green().to_string());
    }
    if totals.files_changed > 0 {
        lines.push(
            format!(
                "Fixed {} in {}.",
                plural(totals.fixes, "problem"),
                plural(totals.files_changed, "file")
            )
            .green()
            .to_string(),
        );
    }
    if totals.warnings > 0 {
        lines.push(format!("{}.", plural(totals.warnings, "warning")).yellow().to_string());
    }
    lines
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
