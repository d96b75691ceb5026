//! Open Text Documents
//!
//! Holds the full text of an open document and applies incremental edits.
//! LSP positions count UTF-16 code units, text is stored as UTF-8, so every
//! position goes through [`TextDocument::offset_at`] / [`TextDocument::position_at`].

use crate::error::{MccmdError, Result};
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

/// An open document
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: Url,
    version: i32,
    text: String,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
}

impl TextDocument {
    /// Create a document from its full text
    pub fn new(uri: Url, version: i32, text: String) -> Self {
        let line_starts = compute_line_starts(&text);
        Self {
            uri,
            version,
            text,
            line_starts,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Apply content changes in order. A change without a range replaces
    /// the whole document. Either every change applies or the document is
    /// left untouched.
    pub fn apply_changes(
        &mut self,
        version: i32,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<()> {
        let mut edited = self.clone();
        for change in changes {
            match change.range {
                Some(range) => {
                    let start = edited.offset_at(range.start)?;
                    let end = edited.offset_at(range.end)?.max(start);
                    edited.text.replace_range(start..end, &change.text);
                }
                None => edited.text = change.text.clone(),
            }
            edited.line_starts = compute_line_starts(&edited.text);
        }
        edited.version = version;
        *self = edited;
        Ok(())
    }

    /// Text of a line without its line terminator
    pub fn line(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let text = &self.text[start..end];
        let text = text.strip_suffix('\n').unwrap_or(text);
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Text from the start of the position's line up to the position
    pub fn line_prefix(&self, position: Position) -> Result<&str> {
        let line = (position.line as usize).min(self.line_count() - 1);
        let end = self.offset_at(position)?;
        Ok(&self.text[self.line_starts[line]..end])
    }

    /// Byte offset of a position. Positions past the end of a line or of the
    /// document clamp to that end.
    pub fn offset_at(&self, position: Position) -> Result<usize> {
        let line = position.line as usize;
        if line >= self.line_count() {
            return Ok(self.text.len());
        }
        let line_text = self.line(line).unwrap_or_default();
        let start = self.line_starts[line];

        let mut units = 0u32;
        for (offset, ch) in line_text.char_indices() {
            if units == position.character {
                return Ok(start + offset);
            }
            units += ch.len_utf16() as u32;
            if units > position.character {
                return Err(MccmdError::InvalidPosition {
                    line: position.line,
                    character: position.character,
                    message: "position splits a UTF-16 surrogate pair".to_string(),
                });
            }
        }
        Ok(start + line_text.len())
    }

    /// Position of a byte offset
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let character = utf16_len(&self.text[start..floor_char_boundary(&self.text, offset)]);
        Position::new(line as u32, character)
    }

    /// Position of a byte column within a line
    pub fn position_in_line(&self, line: usize, column: usize) -> Position {
        let start = self.line_starts.get(line).copied().unwrap_or(self.text.len());
        self.position_at(start + column)
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn doc(text: &str) -> TextDocument {
        TextDocument::new(
            Url::parse("file:///test/commands.mccmd").unwrap(),
            1,
            text.to_string(),
        )
    }

    fn edit(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range::new(
                Position::new(start.0, start.1),
                Position::new(end.0, end.1),
            )),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_lines() {
        let doc = doc("ability @s mayfly\r\nadvancement grant @a everything\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), Some("ability @s mayfly"));
        assert_eq!(doc.line(1), Some("advancement grant @a everything"));
        assert_eq!(doc.line(2), Some(""));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn test_incremental_change() {
        let mut doc = doc("ability @s mayfly\nability @a mute");
        doc.apply_changes(2, &[edit((0, 11), (0, 17), "mute")]).unwrap();
        assert_eq!(doc.text(), "ability @s mute\nability @a mute");

        doc.apply_changes(3, &[edit((1, 15), (1, 15), " true")]).unwrap();
        assert_eq!(doc.line(1), Some("ability @a mute true"));
        assert_eq!(doc.version(), 3);
    }

    #[test]
    fn test_failed_change_leaves_document_untouched() {
        let mut doc = doc("ability 😀 mute");
        let result = doc.apply_changes(
            2,
            &[edit((0, 0), (0, 7), "advancement"), edit((0, 13), (0, 13), "x")],
        );
        assert!(matches!(result, Err(MccmdError::InvalidPosition { .. })));
        assert_eq!(doc.text(), "ability 😀 mute");
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_change_inserting_lines() {
        let mut doc = doc("ability @s mayfly");
        doc.apply_changes(2, &[edit((0, 17), (0, 17), "\nability @a mute")])
            .unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(1), Some("ability @a mute"));
    }

    #[test]
    fn test_full_replacement() {
        let mut doc = doc("ability @s mayfly");
        doc.apply_changes(
            2,
            &[TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "advancement grant @a everything".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(doc.text(), "advancement grant @a everything");
    }

    #[test]
    fn test_utf16_positions() {
        let doc = doc("ability 玩家 mute\nability 😀 mute");
        // Each CJK character is one UTF-16 unit and three UTF-8 bytes
        assert_eq!(doc.offset_at(Position::new(0, 11)).unwrap(), 15);
        assert_eq!(doc.position_at(15), Position::new(0, 11));
        // The emoji is a surrogate pair
        let line_start = doc.text().find('\n').unwrap() + 1;
        assert_eq!(doc.offset_at(Position::new(1, 10)).unwrap(), line_start + 12);
        assert!(doc.offset_at(Position::new(1, 9)).is_err());
    }

    #[test]
    fn test_positions_clamp() {
        let doc = doc("ability @s\nability");
        assert_eq!(doc.offset_at(Position::new(0, 99)).unwrap(), 10);
        assert_eq!(doc.offset_at(Position::new(9, 0)).unwrap(), doc.text().len());
    }

    #[test]
    fn test_line_prefix() {
        let doc = doc("ability @s mayfly\nadvancement grant");
        assert_eq!(doc.line_prefix(Position::new(0, 11)).unwrap(), "ability @s ");
        assert_eq!(doc.line_prefix(Position::new(1, 5)).unwrap(), "advan");
    }
}
