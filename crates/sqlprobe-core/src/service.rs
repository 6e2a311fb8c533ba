//! Catalog-scoped editor service
//!
//! [`EditorService`] is what a host editor talks to: three side-effect free
//! capabilities (`analyze`, `provide_completions`, `provide_hover`) over the
//! current assignment's catalog, plus the last published diagnostic set.
//! [`LiveSession`] adds debounced re-analysis on text changes.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::debug;

use crate::analyzer::Analyzer;
use crate::completion::{self, Completion, SuggestionCatalog};
use crate::debounce::Debouncer;
use crate::error::Diagnostic;
use crate::hover::{self, Hover};
use crate::position::Position;
use crate::schema::{Catalog, TableDef};

#[derive(Debug, Clone, Default)]
pub struct EditorService {
    analyzer: Analyzer,
    catalog: Catalog,
    suggestions: SuggestionCatalog,
    diagnostics: Vec<Diagnostic>,
}

impl EditorService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            suggestions: SuggestionCatalog::from_catalog(&catalog),
            catalog,
            ..Self::default()
        }
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Replace the catalog and regenerate every schema-derived suggestion
    pub fn load_schema(&mut self, tables: Vec<TableDef>) {
        self.catalog.load(tables);
        self.suggestions.rebuild(&self.catalog);
        debug!(tables = self.catalog.len(), "schema loaded");
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn suggestions(&self) -> &SuggestionCatalog {
        &self.suggestions
    }

    pub fn analyze(&self, text: &str) -> Vec<Diagnostic> {
        self.analyzer.analyze(text)
    }

    /// Analyze `text` and make the result the published diagnostic set
    pub fn publish(&mut self, text: &str) -> &[Diagnostic] {
        self.diagnostics = self.analyze(text);
        &self.diagnostics
    }

    /// The diagnostics from the last [`publish`](Self::publish)
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn provide_completions(&self, text: &str, cursor: Position) -> Vec<Completion<'_>> {
        completion::provide_completions(&self.suggestions, text, cursor)
    }

    pub fn provide_hover(&self, word: &str) -> Option<String> {
        hover::provide_hover(&self.catalog, word)
    }

    pub fn hover_at(&self, text: &str, position: Position) -> Option<Hover> {
        hover::hover_at(&self.catalog, text, position)
    }
}

/// An open document whose diagnostics follow its text
#[derive(Debug)]
pub struct LiveSession {
    service: Arc<RwLock<EditorService>>,
    debouncer: Debouncer,
}

impl LiveSession {
    pub fn new(service: EditorService, delay: Duration) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Schedule a re-analysis of `text`, superseding any pending one.
    /// Must be called from within a Tokio runtime.
    pub fn on_text_change(&self, text: impl Into<String>) {
        let text = text.into();
        let service = Arc::clone(&self.service);
        self.debouncer.schedule(move || {
            let mut service = service.write().unwrap_or_else(PoisonError::into_inner);
            let published = service.publish(&text).len();
            debug!(diagnostics = published, "published diagnostics");
        });
    }

    pub fn load_schema(&self, tables: Vec<TableDef>) {
        self.write().load_schema(tables);
    }

    /// Snapshot of the published diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.read().diagnostics().to_vec()
    }

    pub fn has_pending_analysis(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, EditorService> {
        self.service.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EditorService> {
        self.service.write().unwrap_or_else(PoisonError::into_inner)
    }
}
