//! Cursor positions, ranges and word boundaries over document text
//!
//! All coordinates are 1-indexed and counted in characters, matching what an
//! editor shows on screen. Column `c` sits between character `c - 1` and `c`.

use serde::{Deserialize, Serialize};

/// Cursor position (1-indexed line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Half-open character range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Range {
    /// Range covering `start_column..end_column` on a single line
    pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self {
            start_line: line,
            start_column,
            end_line: line,
            end_column,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_column == self.end_column
    }
}

/// An identifier located in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub range: Range,
}

/// Identifier characters: ASCII letters, digits and underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Get a specific line from source (1-indexed), without its line terminator
pub fn line_at(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source
        .split('\n')
        .nth(line - 1)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Clamp a position to the document: lines past the end snap to the last
/// line, columns past the end of a line snap to one past its last character.
pub fn clamp(source: &str, position: Position) -> Position {
    let line_count = source.split('\n').count();
    let line = position.line.clamp(1, line_count);
    let max_column = line_at(source, line).map_or(0, |l| l.chars().count()) + 1;
    Position::new(line, position.column.clamp(1, max_column))
}

/// The identifier prefix ending at `position`, possibly empty.
///
/// The returned range starts at the first identifier character contiguous
/// with the cursor going left and ends at the cursor.
pub fn word_until_position(source: &str, position: Position) -> Word {
    let position = clamp(source, position);
    let chars: Vec<char> = line_at(source, position.line)
        .unwrap_or_default()
        .chars()
        .collect();
    let end = position.column - 1;
    let start = chars[..end]
        .iter()
        .rposition(|&c| !is_word_char(c))
        .map_or(0, |i| i + 1);

    Word {
        text: chars[start..end].iter().collect(),
        range: Range::on_line(position.line, start + 1, end + 1),
    }
}

/// The whole identifier touching `position`, if any.
///
/// A cursor placed directly after the last character of an identifier still
/// touches it.
pub fn word_at_position(source: &str, position: Position) -> Option<Word> {
    let position = clamp(source, position);
    let chars: Vec<char> = line_at(source, position.line)?.chars().collect();
    let cursor = position.column - 1;

    let start = chars[..cursor]
        .iter()
        .rposition(|&c| !is_word_char(c))
        .map_or(0, |i| i + 1);
    let end = chars[cursor..]
        .iter()
        .position(|&c| !is_word_char(c))
        .map_or(chars.len(), |i| cursor + i);

    if start == end {
        return None;
    }

    Some(Word {
        text: chars[start..end].iter().collect(),
        range: Range::on_line(position.line, start + 1, end + 1),
    })
}
