//! Whitespace normalizer — converts text to canonical whitespace form
//!
//! # Pipeline
//!
//! Applied in this order, each step counting what it changed:
//!
//! 1. CRLF → LF
//! 2. lone CR → LF
//! 3. strip trailing spaces/tabs from every line
//! 4. append a final LF if missing
//! 5. collapse a trailing run of LFs to exactly one
//!
//! A space-before-tab check runs over the result; it only warns.
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize(normalize(x).text).report` is all zero
//! - **Deterministic**: same input always produces same output

// ── Public API ─────────────────────────────────────────────

/// Counts of what the pipeline changed in one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// CRLF pairs replaced by LF
    pub crlf: usize,
    /// Lone CRs replaced by LF
    pub cr: usize,
    /// Lines that lost trailing spaces/tabs
    pub trailing_whitespace: usize,
    pub missing_final_newline: bool,
    pub trailing_blank_lines: bool,
    /// Informational: normalized text contains " \t"
    pub space_before_tab: bool,
}

impl ChangeReport {
    /// Sum of every fix category. The warning flag does not count.
    pub fn fixes(&self) -> usize {
        self.crlf
            + self.cr
            + self.trailing_whitespace
            + usize::from(self.missing_final_newline)
            + usize::from(self.trailing_blank_lines)
    }
}

/// Normalized text plus the report of how it was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub report: ChangeReport,
}

/// Run the whitespace pipeline over `original`
pub fn normalize(original: &str) -> Normalized {
    let mut report = ChangeReport::default();

    // ── Steps 1-2: line endings ────────────────────────
    let (text, crlf) = replace_counting(original, "\r\n", "\n");
    report.crlf = crlf;
    let (text, cr) = replace_counting(&text, "\r", "\n");
    report.cr = cr;

    // ── Step 3: trailing whitespace ────────────────────
    let (mut text, stripped) = strip_trailing_whitespace(&text);
    report.trailing_whitespace = stripped;

    // ── Step 4: final newline ──────────────────────────
    if !text.ends_with('\n') {
        text.push('\n');
        report.missing_final_newline = true;
    }

    // ── Step 5: trailing blank lines ───────────────────
    let trailing = text.bytes().rev().take_while(|&b| b == b'\n').count();
    if trailing > 1 {
        text.truncate(text.len() - (trailing - 1));
        report.trailing_blank_lines = true;
    }

    report.space_before_tab = text.contains(" \t");

    Normalized { text, report }
}

// ── Passes ─────────────────────────────────────────────────

/// Replace every non-overlapping `from` with `to`, left to right
fn replace_counting(text: &str, from: &str, to: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut rest = text;
    while let Some(pos) = rest.find(from) {
        out.push_str(&rest[..pos]);
        out.push_str(to);
        rest = &rest[pos + from.len()..];
        count += 1;
    }
    out.push_str(rest);
    (out, count)
}

/// Strip spaces/tabs before each LF and at the end of the buffer.
/// Returns the number of lines that changed.
fn strip_trailing_whitespace(text: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let trimmed = line.trim_end_matches([' ', '\t']);
        if trimmed.len() != line.len() {
            count += 1;
        }
        out.push_str(trimmed);
    }
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(input: &str) -> ChangeReport {
        normalize(input).report
    }

    // ── Line endings ───────────────────────────────────

    #[test]
    fn test_crlf_converted_and_counted() {
        let result = normalize("one\r\ntwo\r\nthree\r\n");
        assert_eq!(result.text, "one\ntwo\nthree\n");
        assert_eq!(result.report.crlf, 3);
        assert_eq!(result.report.cr, 0);
        assert!(!result.text.contains('\r'));
    }

    #[test]
    fn test_lone_cr_converted_and_counted() {
        let result = normalize("one\rtwo\rthree\r");
        assert_eq!(result.text, "one\ntwo\nthree\n");
        assert_eq!(result.report.crlf, 0);
        assert_eq!(result.report.cr, 3);
    }

    #[test]
    fn test_cr_before_crlf() {
        // CRLF goes first, the leading CR is left for the lone-CR pass
        let result = normalize("a\r\r\nb\n");
        assert_eq!(result.text, "a\n\nb\n");
        assert_eq!(result.report.crlf, 1);
        assert_eq!(result.report.cr, 1);
    }

    #[test]
    fn test_mixed_line_endings() {
        let r = report("a\r\nb\rc\nd\r\n");
        assert_eq!((r.crlf, r.cr), (2, 1));
    }

    // ── Trailing whitespace ────────────────────────────

    #[test]
    fn test_trailing_spaces_stripped() {
        let result = normalize("foo   \n");
        assert_eq!(result.text, "foo\n");
        assert_eq!(result.report.trailing_whitespace, 1);
    }

    #[test]
    fn test_trailing_whitespace_on_every_line() {
        let result = normalize("a \t\nb\nc\t\n");
        assert_eq!(result.text, "a\nb\nc\n");
        assert_eq!(result.report.trailing_whitespace, 2);
    }

    #[test]
    fn test_trailing_whitespace_on_unterminated_last_line() {
        let result = normalize("a\nb  ");
        assert_eq!(result.text, "a\nb\n");
        assert_eq!(result.report.trailing_whitespace, 1);
        assert!(result.report.missing_final_newline);
    }

    #[test]
    fn test_trailing_whitespace_after_crlf_conversion() {
        let result = normalize("x  \r\ny\t\r\n");
        assert_eq!(result.text, "x\ny\n");
        assert_eq!(result.report.crlf, 2);
        assert_eq!(result.report.trailing_whitespace, 2);
    }

    #[test]
    fn test_leading_and_inner_whitespace_kept() {
        let result = normalize("\tindented  inner\n");
        assert_eq!(result.text, "\tindented  inner\n");
        assert_eq!(result.report.fixes(), 0);
    }

    // ── Final newline ──────────────────────────────────

    #[test]
    fn test_missing_final_newline() {
        let result = normalize("abc");
        assert_eq!(result.text, "abc\n");
        assert!(result.report.missing_final_newline);
        assert!(!report("abc\n").missing_final_newline);
    }

    #[test]
    fn test_empty_input_gets_newline() {
        let result = normalize("");
        assert_eq!(result.text, "\n");
        assert!(result.report.missing_final_newline);
    }

    // ── Trailing blank lines ───────────────────────────

    #[test]
    fn test_trailing_blank_lines_collapsed() {
        let result = normalize("abc\n\n\n");
        assert_eq!(result.text, "abc\n");
        assert!(result.report.trailing_blank_lines);

        let result = normalize("abc\n\n");
        assert_eq!(result.text, "abc\n");
        assert!(result.report.trailing_blank_lines);
    }

    #[test]
    fn test_inner_blank_lines_kept() {
        let result = normalize("a\n\n\nb\n");
        assert_eq!(result.text, "a\n\n\nb\n");
        assert!(!result.report.trailing_blank_lines);
    }

    #[test]
    fn test_whitespace_only_tail_collapses() {
        let result = normalize("a\n  \n\t\n");
        assert_eq!(result.text, "a\n");
        assert_eq!(result.report.trailing_whitespace, 2);
        assert!(result.report.trailing_blank_lines);
    }

    #[test]
    fn test_crlf_blank_tail() {
        let result = normalize("a\r\n\r\n\r\n");
        assert_eq!(result.text, "a\n");
        assert_eq!(result.report.crlf, 3);
        assert!(result.report.trailing_blank_lines);
        assert_eq!(result.report.fixes(), 4);
    }

    // ── Space before tab ───────────────────────────────

    #[test]
    fn test_space_before_tab_warns() {
        let result = normalize("a \tb\n");
        assert!(result.report.space_before_tab);
        assert_eq!(result.text, "a \tb\n");
        assert_eq!(result.report.fixes(), 0);
    }

    #[test]
    fn test_tab_before_space_does_not_warn() {
        assert!(!report("a\t b\n").space_before_tab);
        assert!(!report("plain\n").space_before_tab);
    }

    #[test]
    fn test_space_before_tab_at_line_end_is_stripped_not_warned() {
        let result = normalize("a \t\n");
        assert_eq!(result.text, "a\n");
        assert!(!result.report.space_before_tab);
    }

    // ── Properties ─────────────────────────────────────

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "abc",
            "a\r\nb\rc  \n\n\n",
            "  \t \r\n\r\r\n",
            "x \ty\t\n\n",
            "ünïcödé  \r\n",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.text);
            assert_eq!(once.text, twice.text, "not idempotent for {:?}", input);
            assert_eq!(twice.report.fixes(), 0, "fixes on second pass for {:?}", input);
        }
    }

    #[test]
    fn test_clean_text_untouched() {
        let input = "fn main() {\n    println!(\"hi\");\n}\n";
        let result = normalize(input);
        assert_eq!(result.text, input);
        assert_eq!(result.report, ChangeReport::default());
    }

    #[test]
    fn test_fixes_sum() {
        let r = ChangeReport {
            crlf: 2,
            cr: 1,
            trailing_whitespace: 3,
            missing_final_newline: true,
            trailing_blank_lines: true,
            space_before_tab: true,
        };
        assert_eq!(r.fixes(), 8);
    }

    #[test]
    fn test_determinism_100_iterations() {
        let input = "a \t\r\nb\rc   \n\n";
        let first = normalize(input);
        for i in 0..100 {
            assert_eq!(first, normalize(input), "Non-determinism at iteration {}", i);
        }
    }
}
