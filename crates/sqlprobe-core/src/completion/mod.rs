//! Completion provider
//!
//! Completions are never filtered or ranked here. The host editor matches
//! the in-progress word against labels itself, so every request returns the
//! whole vocabulary bound to the range that word occupies.

mod vocabulary;

use serde::Serialize;

use crate::position::{word_until_position, Position, Range};

pub use vocabulary::{
    static_suggestions, Suggestion, SuggestionCatalog, SuggestionKind, FUNCTIONS, KEYWORDS,
};

/// A suggestion bound to the range its insert text replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion<'a> {
    #[serde(flatten)]
    pub suggestion: &'a Suggestion,
    pub range: Range,
}

/// Produce the completion list for a cursor position.
///
/// The replacement range covers the identifier prefix to the left of the
/// cursor and ends at the cursor.
pub fn provide_completions<'a>(
    suggestions: &'a SuggestionCatalog,
    text: &str,
    cursor: Position,
) -> Vec<Completion<'a>> {
    let range = word_until_position(text, cursor).range;
    suggestions
        .iter()
        .map(|suggestion| Completion { suggestion, range })
        .collect()
}
