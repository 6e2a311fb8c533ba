//! SQL analyzer module

mod rules;

use std::collections::HashSet;

use tracing::trace;

use crate::error::{Diagnostic, DiagnosticKind};

pub use rules::LineRules;

/// SQL Analyzer - line-local syntax checks over a whole document
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    disabled: HashSet<DiagnosticKind>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an analyzer that skips the given rules
    pub fn with_disabled(disabled: impl IntoIterator<Item = DiagnosticKind>) -> Self {
        Self {
            disabled: disabled.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, kind: DiagnosticKind) -> bool {
        !self.disabled.contains(&kind)
    }

    /// Analyze SQL text and return diagnostics, in line then rule order.
    ///
    /// The whole document is re-scanned on every call.
    pub fn analyze(&self, sql: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut offset = 0;

        for (index, raw) in sql.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            diagnostics.extend(
                LineRules::new(index + 1, offset, line)
                    .check()
                    .into_iter()
                    .filter(|d| self.is_enabled(d.kind)),
            );
            offset += raw.len() + 1;
        }

        trace!(
            bytes = sql.len(),
            diagnostics = diagnostics.len(),
            "analysis pass finished"
        );
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_select() {
        let analyzer = Analyzer::new();
        let diagnostics = analyzer.analyze("SELECT id, name FROM users WHERE id = 1;");
        assert!(
            diagnostics.is_empty(),
            "Expected no errors: {:?}",
            diagnostics
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(Analyzer::new().analyze("").is_empty());
        assert!(Analyzer::new().analyze("\n\n  \n").is_empty());
    }

    #[test]
    fn test_unmatched_parentheses_spans_line() {
        let diagnostics = Analyzer::new().analyze("(a, b");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnmatchedParentheses);
        assert_eq!(diagnostics[0].message, "Unmatched parentheses");
        assert_eq!(diagnostics[0].span.column, 1);
        assert_eq!(diagnostics[0].span.length, 5);
    }

    #[test]
    fn test_rule_order_within_line() {
        let diagnostics = Analyzer::new().analyze("from x where (a = 'b\" select");
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnmatchedParentheses,
                DiagnosticKind::UnmatchedSingleQuote,
                DiagnosticKind::UnmatchedDoubleQuote,
                DiagnosticKind::SelectAfterFrom,
                DiagnosticKind::MissingColumnList,
            ]
        );
    }

    #[test]
    fn test_line_numbers_and_offsets() {
        let sql = "SELECT *\r\nFROM\n\nWHERE (x";
        let diagnostics = Analyzer::new().analyze(sql);
        assert_eq!(diagnostics.len(), 2);

        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingTableName);
        assert_eq!(diagnostics[0].span.line, 2);
        assert_eq!(diagnostics[0].span.column, 1);
        assert_eq!(diagnostics[0].span.offset, 10);

        assert_eq!(diagnostics[1].kind, DiagnosticKind::UnmatchedParentheses);
        assert_eq!(diagnostics[1].span.line, 4);
        assert_eq!(diagnostics[1].span.offset, 16);
        assert_eq!(&sql[16..], "WHERE (x");
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let analyzer = Analyzer::with_disabled([DiagnosticKind::UnmatchedParentheses]);
        assert!(analyzer.analyze("(a, b").is_empty());
        assert_eq!(analyzer.analyze("SELECT").len(), 1);
    }

    #[test]
    fn test_per_line_balancing() {
        // A parenthesized expression split across lines is reported on both
        let diagnostics = Analyzer::new().analyze("SELECT COUNT(\n*) FROM t");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::UnmatchedParentheses));
    }
}
