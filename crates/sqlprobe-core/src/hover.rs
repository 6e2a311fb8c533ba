//! Hover provider - describes tables and columns from the schema catalog

use serde::Serialize;

use crate::position::{word_at_position, Position, Range};
use crate::schema::{Catalog, ColumnDef, TableDef};

/// Hover text for a word in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    pub contents: String,
    pub range: Range,
}

/// Describe `word`: tables first, then the first column with that name
pub fn provide_hover(catalog: &Catalog, word: &str) -> Option<String> {
    if let Some(table) = catalog.find_table(word) {
        return Some(describe_table(table));
    }

    catalog
        .find_column(word)
        .map(|(table, column)| describe_column(table, column))
}

/// Hover for the identifier touching `position`
pub fn hover_at(catalog: &Catalog, text: &str, position: Position) -> Option<Hover> {
    let word = word_at_position(text, position)?;
    let contents = provide_hover(catalog, &word.text)?;
    Some(Hover {
        contents,
        range: word.range,
    })
}

fn describe_table(table: &TableDef) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("• {} ({})", c.name, c.data_type))
        .collect::<Vec<_>>()
        .join("\n");
    format!("**Table: {}**\n\nColumns:\n{}", table.name, columns)
}

fn describe_column(table: &TableDef, column: &ColumnDef) -> String {
    format!(
        "**Column: {}**\n\nType: {}\nTable: {}",
        column.name, column.data_type, table.name
    )
}
