//! Edit buffer model
//!
//! - text storage (Rope)
//! - a single cursor in (row, grapheme column) coordinates
//! - row/column ↔ char offset mapping

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Borrow the slice as `&str` when it is contiguous, copy otherwise.
fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Chars ropey splits lines on (CRLF is handled as a pair).
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: (0, 0),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Swap in new contents and put the cursor back at the origin.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = (0, 0);
    }

    pub fn clear(&mut self) {
        self.replace_text("");
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Contents of `row` without its line break; empty past the end.
    pub fn line_text(&self, row: usize) -> String {
        if row >= self.rope.len_lines() {
            return String::new();
        }
        let start = self.rope.line_to_char(row);
        let end = start + self.line_content_chars(row);
        self.rope.slice(start..end).to_string()
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        let start = self.rope.line_to_char(row);
        let end = start + self.line_content_chars(row);
        slice_to_cow(self.rope.slice(start..end))
            .graphemes(true)
            .count()
    }

    /// Length in chars of the break terminating `row` (0, 1, or 2 for CRLF).
    fn line_break_chars(&self, row: usize) -> usize {
        let line = self.rope.line(row);
        let len = line.len_chars();
        if len == 0 || !is_line_break(line.char(len - 1)) {
            return 0;
        }
        if len >= 2 && line.char(len - 1) == '\n' && line.char(len - 2) == '\r' {
            2
        } else {
            1
        }
    }

    fn line_content_chars(&self, row: usize) -> usize {
        self.rope.line(row).len_chars() - self.line_break_chars(row)
    }

    fn pos_to_char(&self, (row, col): (usize, usize)) -> usize {
        let line = slice_to_cow(self.rope.line(row));
        let within: usize = line
            .graphemes(true)
            .take(col)
            .map(|g| g.chars().count())
            .sum();
        self.rope.line_to_char(row) + within.min(self.line_content_chars(row))
    }

    fn last_row(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }

    /// Place the cursor on the char boundary `offset`, clamped to the line content.
    fn cursor_at_char(&mut self, offset: usize) {
        let row = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(row);
        let head_end = offset.min(line_start + self.line_content_chars(row));
        let col = slice_to_cow(self.rope.slice(line_start..head_end))
            .graphemes(true)
            .count();
        self.cursor = (row, col);
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.pos_to_char(self.cursor);
        self.rope.insert_char(offset, c);
        // A combining mark merges into the preceding grapheme.
        self.cursor_at_char(offset + 1);
    }

    pub fn insert_str(&mut self, s: &str) {
        let offset = self.pos_to_char(self.cursor);
        self.rope.insert(offset, s);
        self.cursor_at_char(offset + s.chars().count());
    }

    /// Backspace. Returns whether any text was removed.
    pub fn delete_backward(&mut self) -> bool {
        let (row, col) = self.cursor;

        let (start, end) = if col > 0 {
            (
                self.pos_to_char((row, col - 1)),
                self.pos_to_char((row, col)),
            )
        } else if row > 0 {
            let end = self.rope.line_to_char(row);
            (end - self.line_break_chars(row - 1), end)
        } else {
            return false;
        };
        if start == end {
            return false;
        }

        self.rope.remove(start..end);
        self.cursor_at_char(start);
        true
    }

    /// Delete key. Returns whether any text was removed.
    pub fn delete_forward(&mut self) -> bool {
        let (row, col) = self.cursor;

        let start = self.pos_to_char((row, col));
        let end = if col < self.line_grapheme_len(row) {
            self.pos_to_char((row, col + 1))
        } else if row < self.last_row() {
            self.rope.line_to_char(row + 1)
        } else {
            return false;
        };
        if start == end {
            return false;
        }

        self.rope.remove(start..end);
        self.cursor_at_char(start);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
        } else if row > 0 {
            self.cursor = (row - 1, self.line_grapheme_len(row - 1));
        } else {
            return false;
        }
        true
    }

    pub fn move_right(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col < self.line_grapheme_len(row) {
            self.cursor = (row, col + 1);
        } else if row < self.last_row() {
            self.cursor = (row + 1, 0);
        } else {
            return false;
        }
        true
    }

    pub fn move_up(&mut self) -> bool {
        let (row, col) = self.cursor;
        if row == 0 {
            return false;
        }
        self.cursor = (row - 1, col.min(self.line_grapheme_len(row - 1)));
        true
    }

    pub fn move_down(&mut self) -> bool {
        let (row, col) = self.cursor;
        if row >= self.last_row() {
            return false;
        }
        self.cursor = (row + 1, col.min(self.line_grapheme_len(row + 1)));
        true
    }

    pub fn move_line_start(&mut self) -> bool {
        let (row, col) = self.cursor;
        self.cursor = (row, 0);
        col != 0
    }

    pub fn move_line_end(&mut self) -> bool {
        let (row, col) = self.cursor;
        let end = self.line_grapheme_len(row);
        self.cursor = (row, end);
        col != end
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
