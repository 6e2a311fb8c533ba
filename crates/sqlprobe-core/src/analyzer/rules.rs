//! Line-local syntax rules
//!
//! Each rule looks at a single line and emits at most one diagnostic. Quote
//! and parenthesis counting works on the raw text; keyword rules work on a
//! lower-cased, trimmed copy. Reported columns are always relative to the raw
//! line so markers land on the offending text even when it is indented.

use crate::error::{Diagnostic, DiagnosticKind, Span};
use crate::position::is_word_char;

/// Runs every rule against one line of SQL
pub struct LineRules<'a> {
    line_number: usize,
    /// Byte offset of the line within the whole document
    offset: usize,
    raw: &'a str,
    lowered: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LineRules<'a> {
    pub fn new(line_number: usize, offset: usize, raw: &'a str) -> Self {
        Self {
            line_number,
            offset,
            raw,
            // ASCII lowering keeps byte positions identical to `raw`
            lowered: raw.to_ascii_lowercase(),
            diagnostics: Vec::new(),
        }
    }

    /// Evaluate all rules in order and return what they found
    pub fn check(mut self) -> Vec<Diagnostic> {
        if self.raw.trim().is_empty() {
            return Vec::new();
        }

        self.check_parentheses();
        self.check_quote_parity('\'', DiagnosticKind::UnmatchedSingleQuote);
        self.check_quote_parity('"', DiagnosticKind::UnmatchedDoubleQuote);
        self.check_keyword_order();
        self.check_dangling_keyword("from", DiagnosticKind::MissingTableName);
        self.check_dangling_keyword("select", DiagnosticKind::MissingColumnList);

        self.diagnostics
    }

    fn check_parentheses(&mut self) {
        let open = self.raw.matches('(').count();
        let close = self.raw.matches(')').count();
        if open != close {
            let length = self.raw.chars().count();
            self.report(DiagnosticKind::UnmatchedParentheses, 0, length);
        }
    }

    fn check_quote_parity(&mut self, quote: char, kind: DiagnosticKind) {
        if self.raw.matches(quote).count() % 2 == 0 {
            return;
        }
        if let Some(index) = self.raw.find(quote) {
            self.report(kind, index, 1);
        }
    }

    fn check_keyword_order(&mut self) {
        let (lead, trimmed) = self.trimmed();
        let (Some(select), Some(from)) = (trimmed.find("select"), trimmed.find("from")) else {
            return;
        };
        if select > from {
            // Column is on the raw line, not the trimmed copy, so indented
            // lines report where the keyword actually sits
            self.report(DiagnosticKind::SelectAfterFrom, lead + select, "select".len());
        }
    }

    /// `keyword` as a whole word at the very end of the trimmed line
    fn check_dangling_keyword(&mut self, keyword: &str, kind: DiagnosticKind) {
        let (lead, trimmed) = self.trimmed();
        if !trimmed.ends_with(keyword) {
            return;
        }
        let start = trimmed.len() - keyword.len();
        let boundary = trimmed[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        if boundary {
            // Raw-line column, as in check_keyword_order
            self.report(kind, lead + start, keyword.len());
        }
    }

    /// Byte length of the leading whitespace and the trimmed lowered line
    fn trimmed(&self) -> (usize, &str) {
        let start_trimmed = self.lowered.trim_start();
        let lead = self.lowered.len() - start_trimmed.len();
        (lead, start_trimmed.trim_end())
    }

    /// Record a diagnostic at a byte index of the raw line
    fn report(&mut self, kind: DiagnosticKind, byte_index: usize, length: usize) {
        let column = self.raw[..byte_index].chars().count() + 1;
        let span = Span::with_location(self.line_number, column, length)
            .with_offset(self.offset + byte_index);
        self.diagnostics.push(Diagnostic::error(kind, span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(line: &str) -> Vec<Diagnostic> {
        LineRules::new(1, 0, line).check()
    }

    #[test]
    fn test_blank_line() {
        assert!(check("").is_empty());
        assert!(check("   \t ").is_empty());
    }

    #[test]
    fn test_quote_column_counts_characters() {
        let diags = check("é = 'x");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnmatchedSingleQuote);
        assert_eq!(diags[0].span.column, 5);
        assert_eq!(diags[0].span.offset, 5);
    }

    #[test]
    fn test_dangling_keyword_needs_word_boundary() {
        assert!(check("SELECT * FROM datafrom").is_empty());
        assert!(check("SELECT preselect, x FROM t").is_empty());
        let diags = check("SELECT a FROM");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MissingTableName);
        assert_eq!(diags[0].span.column, 10);
        assert_eq!(diags[0].span.length, 4);
    }

    #[test]
    fn test_indented_keyword_anchors_to_raw_line() {
        let diags = check("    from t select");
        let kinds: Vec<_> = diags.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::SelectAfterFrom, DiagnosticKind::MissingColumnList]
        );
        assert_eq!(diags[0].span.column, 12);
        assert_eq!(diags[1].span.column, 12);
    }

    #[test]
    fn test_keyword_order_is_substring_match() {
        // Heuristic: `select` inside an identifier still counts
        let diags = check("FROM t WHERE selected = 1");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::SelectAfterFrom);
    }
}
