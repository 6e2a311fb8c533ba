//! Error and diagnostic types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tag attached to every diagnostic produced by the analyzer
pub const DIAGNOSTIC_SOURCE: &str = "SQL Validator";

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset from start of source
    pub offset: usize,
    /// Length in characters
    pub length: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl Span {
    /// Create a span with line and column information
    pub fn with_location(line: usize, column: usize, length: usize) -> Self {
        Self {
            offset: 0,
            length,
            line,
            column,
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Column one past the last character covered by this span
    pub fn end_column(&self) -> usize {
        self.column + self.length
    }
}

/// Diagnostic severity level. Every analyzer rule reports an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// Diagnostic message for a line of SQL text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub source: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: kind.message().to_string(),
            span,
            source: DIAGNOSTIC_SOURCE.to_string(),
        }
    }

    /// Get the rule code string (e.g., "S0001")
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Types of diagnostics, one per analyzer rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// S0001: `(` and `)` counts differ on a line
    UnmatchedParentheses,
    /// S0002: odd number of `'` on a line
    UnmatchedSingleQuote,
    /// S0003: odd number of `"` on a line
    UnmatchedDoubleQuote,
    /// S0004: `select` appears after `from`
    SelectAfterFrom,
    /// S0005: line ends with a bare `from`
    MissingTableName,
    /// S0006: line ends with a bare `select`
    MissingColumnList,
}

impl DiagnosticKind {
    /// All rules, in evaluation order
    pub const ALL: [DiagnosticKind; 6] = [
        DiagnosticKind::UnmatchedParentheses,
        DiagnosticKind::UnmatchedSingleQuote,
        DiagnosticKind::UnmatchedDoubleQuote,
        DiagnosticKind::SelectAfterFrom,
        DiagnosticKind::MissingTableName,
        DiagnosticKind::MissingColumnList,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::UnmatchedParentheses => "S0001",
            DiagnosticKind::UnmatchedSingleQuote => "S0002",
            DiagnosticKind::UnmatchedDoubleQuote => "S0003",
            DiagnosticKind::SelectAfterFrom => "S0004",
            DiagnosticKind::MissingTableName => "S0005",
            DiagnosticKind::MissingColumnList => "S0006",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::UnmatchedParentheses => "unmatched-parentheses",
            DiagnosticKind::UnmatchedSingleQuote => "unmatched-single-quote",
            DiagnosticKind::UnmatchedDoubleQuote => "unmatched-double-quote",
            DiagnosticKind::SelectAfterFrom => "select-after-from",
            DiagnosticKind::MissingTableName => "missing-table-name",
            DiagnosticKind::MissingColumnList => "missing-column-list",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::UnmatchedParentheses => "Unmatched parentheses",
            DiagnosticKind::UnmatchedSingleQuote => "Unmatched single quote",
            DiagnosticKind::UnmatchedDoubleQuote => "Unmatched double quote",
            DiagnosticKind::SelectAfterFrom => "SELECT must come before FROM",
            DiagnosticKind::MissingTableName => "Missing table name after FROM",
            DiagnosticKind::MissingColumnList => "Missing column specification after SELECT",
        }
    }

    /// Resolve a rule from its code or name, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(code) || k.name().eq_ignore_ascii_case(code))
    }
}

/// Failure to load an assignment schema
#[derive(Debug, Error, miette::Diagnostic)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    #[diagnostic(
        code(sqlprobe::schema::json),
        help("expected an array of tables with tableName, columns and optional rows")
    )]
    Json(#[from] serde_json::Error),
}

/// Failure reported by the external query/hint backend
#[derive(Debug, Clone, Error, miette::Diagnostic)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    #[diagnostic(code(sqlprobe::backend::request))]
    Request(String),

    #[error("backend rejected the query: {0}")]
    #[diagnostic(code(sqlprobe::backend::rejected))]
    Rejected(String),
}

/// Errors surfaced by the editor orchestration layer
#[derive(Debug, Error, miette::Diagnostic)]
pub enum EditorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Backend(#[from] BackendError),
}
