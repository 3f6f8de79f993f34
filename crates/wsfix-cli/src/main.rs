use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;
use wsfix_core::Limits;

mod console;

use console::ConsoleReporter;

const AFTER_HELP: &str = "\
Fixes applied, in order:
  - CRLF line endings are converted to LF
  - lone CR line endings are converted to LF
  - trailing spaces and tabs are removed from every line
  - a missing newline at end of file is added
  - multiple newlines at end of file are collapsed to one
A space followed by a tab is reported as a warning but left alone.

WARNING: files are modified in place. No backups are made.";

/// wsfix — fix whitespace problems in text files
///
/// Binary files, files larger than 10 MB and files that are not ASCII or
/// UTF-8 are skipped. Directories are searched recursively; .git and .hg
/// directories are ignored.
#[derive(Parser)]
#[command(name = "wsfix", after_help = AFTER_HELP)]
struct Cli {
    /// Files, directories or glob patterns to fix
    #[arg(required = true, value_name = "PATTERN")]
    patterns: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help is a usage exit too: print, then fail
            let _ = e.print();
            if e.kind() != ErrorKind::DisplayHelp {
                eprintln!();
                let _ = Cli::command().print_long_help();
            }
            process::exit(2);
        }
    };

    let mut reporter = ConsoleReporter;
    let exit_code = match wsfix_core::run(&cli.patterns, &Limits::default(), &mut reporter) {
        Ok(totals) => {
            for line in console::summary_lines(&totals) {
                println!("{}", line);
            }
            0
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            let _ = Cli::command().print_help();
            2
        }
    };

    process::exit(exit_code);
}
