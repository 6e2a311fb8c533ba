//! sqlprobe-core: SQL text analysis for query editors
//!
//! This library inspects raw SQL text to produce positioned diagnostics and
//! serves schema-aware completion and hover information from an assignment's
//! table catalog, without parsing or executing the query.

pub mod analyzer;
pub mod completion;
pub mod debounce;
pub mod error;
pub mod hover;
pub mod orchestrator;
pub mod position;
pub mod schema;
pub mod service;

pub use analyzer::Analyzer;
pub use completion::{Completion, Suggestion, SuggestionCatalog, SuggestionKind};
pub use debounce::{Debouncer, DEFAULT_ANALYSIS_DEBOUNCE};
pub use error::{BackendError, Diagnostic, DiagnosticKind, EditorError, SchemaError, Severity, Span};
pub use hover::Hover;
pub use orchestrator::{Orchestrator, QueryBackend, RunOutcome, FALLBACK_HINT};
pub use position::{Position, Range};
pub use schema::{Catalog, ColumnDef, TableDef};
pub use service::{EditorService, LiveSession};
