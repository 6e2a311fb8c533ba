//! Static and schema-derived completion vocabulary

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{Catalog, ColumnDef, TableDef};

/// SQL keywords offered in every completion list
pub const KEYWORDS: [&str; 41] = [
    "SELECT",
    "FROM",
    "WHERE",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "DISTINCT",
    "COUNT",
    "SUM",
    "AVG",
    "MAX",
    "MIN",
    "INSERT",
    "UPDATE",
    "DELETE",
    "CREATE",
    "ALTER",
    "DROP",
    "INDEX",
    "TABLE",
    "AND",
    "OR",
    "NOT",
    "IN",
    "LIKE",
    "BETWEEN",
    "IS NULL",
    "IS NOT NULL",
    "LIMIT",
    "OFFSET",
    "UNION",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "AS",
];

/// Common functions and their one-line descriptions
pub const FUNCTIONS: [(&str, &str); 13] = [
    ("COUNT(*)", "Count all rows"),
    ("COUNT(column)", "Count non-null values"),
    ("SUM(column)", "Sum of values"),
    ("AVG(column)", "Average of values"),
    ("MAX(column)", "Maximum value"),
    ("MIN(column)", "Minimum value"),
    ("UPPER(column)", "Convert to uppercase"),
    ("LOWER(column)", "Convert to lowercase"),
    ("LENGTH(column)", "String length"),
    ("SUBSTRING(column, start, length)", "Extract substring"),
    ("CONCAT(str1, str2)", "Concatenate strings"),
    ("NOW()", "Current timestamp"),
    ("DATE(column)", "Extract date part"),
];

/// Kind of completion candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Keyword,
    Function,
    Table,
    Column,
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SuggestionKind::Keyword => "keyword",
            SuggestionKind::Function => "function",
            SuggestionKind::Table => "table",
            SuggestionKind::Column => "column",
        };
        f.pad(name)
    }
}

/// A labeled completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    pub insert_text: String,
    pub detail: String,
    pub documentation: String,
}

impl Suggestion {
    fn new(
        label: impl Into<String>,
        kind: SuggestionKind,
        detail: impl Into<String>,
        documentation: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: detail.into(),
            documentation: documentation.into(),
        }
    }

    pub fn keyword(keyword: &str) -> Self {
        Self::new(
            keyword,
            SuggestionKind::Keyword,
            "SQL Keyword",
            format!("SQL keyword: {keyword}"),
        )
    }

    pub fn function(signature: &str, description: &str) -> Self {
        Self::new(signature, SuggestionKind::Function, description, description)
    }

    pub fn table(table: &TableDef) -> Self {
        Self::new(
            &table.name,
            SuggestionKind::Table,
            format!("Table: {}", table.name),
            format!("Table with {} columns", table.columns.len()),
        )
    }

    /// `table.column` form
    pub fn qualified_column(table: &TableDef, column: &ColumnDef) -> Self {
        Self::new(
            format!("{}.{}", table.name, column.name),
            SuggestionKind::Column,
            &column.data_type,
            column_documentation(table, column),
        )
    }

    /// Bare `column` form
    pub fn column(table: &TableDef, column: &ColumnDef) -> Self {
        Self::new(
            &column.name,
            SuggestionKind::Column,
            format!("{} - {}", column.data_type, table.name),
            column_documentation(table, column),
        )
    }
}

fn column_documentation(table: &TableDef, column: &ColumnDef) -> String {
    format!(
        "Column: {} ({}) from table {}",
        column.name, column.data_type, table.name
    )
}

/// Keyword then function suggestions, built once per process
pub fn static_suggestions() -> &'static [Suggestion] {
    static STATIC: OnceLock<Vec<Suggestion>> = OnceLock::new();
    STATIC.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|k| Suggestion::keyword(k))
            .chain(FUNCTIONS.iter().map(|(f, d)| Suggestion::function(f, d)))
            .collect()
    })
}

/// Full completion vocabulary: the static part plus suggestions derived
/// from the current schema catalog
#[derive(Debug, Clone, Default)]
pub struct SuggestionCatalog {
    schema: Vec<Suggestion>,
}

impl SuggestionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut suggestions = Self::new();
        suggestions.rebuild(catalog);
        suggestions
    }

    /// Regenerate every schema-derived suggestion from `catalog`
    pub fn rebuild(&mut self, catalog: &Catalog) {
        self.schema = catalog
            .tables()
            .iter()
            .flat_map(|table| {
                std::iter::once(Suggestion::table(table)).chain(table.columns.iter().flat_map(
                    move |column| {
                        [
                            Suggestion::qualified_column(table, column),
                            Suggestion::column(table, column),
                        ]
                    },
                ))
            })
            .collect();
        debug!(
            schema_suggestions = self.schema.len(),
            "rebuilt schema suggestions"
        );
    }

    /// Suggestions derived from the schema, in catalog order
    pub fn schema_suggestions(&self) -> &[Suggestion] {
        &self.schema
    }

    /// Every suggestion: keywords, functions, then schema entries
    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        static_suggestions().iter().chain(self.schema.iter())
    }

    pub fn len(&self) -> usize {
        static_suggestions().len() + self.schema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_static_vocabulary() {
        let suggestions = static_suggestions();
        assert_eq!(suggestions.len(), KEYWORDS.len() + FUNCTIONS.len());
        assert_eq!(suggestions[0], Suggestion::keyword("SELECT"));
        assert_eq!(suggestions[0].documentation, "SQL keyword: SELECT");

        let last = suggestions.last().unwrap();
        assert_eq!(last.label, "DATE(column)");
        assert_eq!(last.kind, SuggestionKind::Function);
        assert_eq!(last.detail, "Extract date part");

        // Shared instance
        assert!(std::ptr::eq(static_suggestions(), suggestions));
    }

    #[test]
    fn test_schema_suggestions() {
        let catalog = Catalog::new(vec![TableDef::new("users")
            .with_column(ColumnDef::new("id", "INT"))
            .with_column(ColumnDef::new("email", "TEXT"))]);
        let suggestions = SuggestionCatalog::from_catalog(&catalog);

        let labels: Vec<_> = suggestions
            .schema_suggestions()
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["users", "users.id", "id", "users.email", "email"]
        );

        let table = &suggestions.schema_suggestions()[0];
        assert_eq!(table.kind, SuggestionKind::Table);
        assert_eq!(table.detail, "Table: users");
        assert_eq!(table.documentation, "Table with 2 columns");

        let qualified = &suggestions.schema_suggestions()[1];
        assert_eq!(qualified.detail, "INT");
        assert_eq!(qualified.insert_text, "users.id");
        assert_eq!(qualified.documentation, "Column: id (INT) from table users");

        let bare = &suggestions.schema_suggestions()[2];
        assert_eq!(bare.detail, "INT - users");

        let single = Suggestion::table(&TableDef::new("t").with_column(ColumnDef::new("a", "INT")));
        assert_eq!(single.documentation, "Table with 1 columns");
    }

    #[test]
    fn test_rebuild_drops_stale_entries() {
        let mut suggestions = SuggestionCatalog::from_catalog(&Catalog::new(vec![
            TableDef::new("users").with_column(ColumnDef::new("id", "INT")),
        ]));
        suggestions.rebuild(&Catalog::new(vec![TableDef::new("products")]));

        assert!(!suggestions.iter().any(|s| s.label.starts_with("users")));
        assert_eq!(suggestions.schema_suggestions().len(), 1);
        assert_eq!(
            suggestions.schema_suggestions()[0].documentation,
            "Table with 0 columns"
        );
        assert_eq!(suggestions.len(), static_suggestions().len() + 1);
    }
}
