//! Schema catalog - stores the current assignment's tables and columns

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaError;

/// A sample row, keyed by column name in column order
pub type SampleRow = IndexMap<String, serde_json::Value>;

/// Schema catalog - holds all table information for one assignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    tables: Vec<TableDef>,
}

/// Accepted shapes of an assignment schema document
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Tables(Vec<TableDef>),
    Assignment {
        #[serde(rename = "sampleTables", default)]
        sample_tables: Vec<TableDef>,
    },
}

impl Catalog {
    pub fn new(tables: Vec<TableDef>) -> Self {
        Self { tables }
    }

    /// Parse a catalog from JSON.
    ///
    /// Accepts either a bare array of tables or an assignment object carrying
    /// a `sampleTables` array.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let tables = match serde_json::from_str::<SchemaDocument>(json)? {
            SchemaDocument::Tables(tables) => tables,
            SchemaDocument::Assignment { sample_tables } => sample_tables,
        };
        Ok(Self::new(tables))
    }

    /// Replace every table in the catalog
    pub fn load(&mut self, tables: Vec<TableDef>) {
        debug!(tables = tables.len(), "loading schema catalog");
        self.tables = tables;
    }

    /// Look up a table by name (case-insensitive, first match wins)
    pub fn find_table(&self, name: &str) -> Option<&TableDef> {
        self.tables
            .iter()
            .find(|t| eq_ignore_case(&t.name, name))
    }

    /// Look up a column by name across all tables, in catalog order
    pub fn find_column(&self, name: &str) -> Option<(&TableDef, &ColumnDef)> {
        self.tables
            .iter()
            .find_map(|t| t.get_column(name).map(|c| (t, c)))
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> bool {
        self.find_table(name).is_some()
    }

    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    /// Get all table names, in catalog order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Table definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    #[serde(rename = "tableName")]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(rename = "rows", default, skip_serializing_if = "Option::is_none")]
    pub sample_rows: Option<Vec<SampleRow>>,
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            sample_rows: None,
        }
    }

    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_rows(mut self, rows: Vec<SampleRow>) -> Self {
        self.sample_rows = Some(rows);
        self
    }

    /// Get a column by name (case-insensitive)
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| eq_ignore_case(&c.name, name))
    }

    /// Check if a column exists
    pub fn column_exists(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of sample rows shipped with the table
    pub fn row_count(&self) -> usize {
        self.sample_rows.as_ref().map_or(0, Vec::len)
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    #[serde(rename = "columnName")]
    pub name: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Unicode-aware case-insensitive name comparison
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
