//! Schema management module

mod catalog;

pub use catalog::{Catalog, ColumnDef, SampleRow, TableDef};
