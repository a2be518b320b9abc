//! Text Editor: Multi-line plain-text editing in a bounded region.
//!
//! The document is a list of lines; the newline between them exists only at
//! the [`text`](TextEditor::text) boundary. A 2-D cursor addresses a line and
//! a column within it, where the column may equal the line length (the
//! insertion point after the last character). The viewport follows the cursor
//! during drawing so the cursor cell, rendered with inverted colors, is
//! always visible.

use super::traits::Widget;
use crate::actor::{KeyCode, KeyEvent};
use crate::buffer::{Color, ScreenBuffer};
use crate::error::GeometryError;
use crate::layout::{Point, Rect};

/// Multi-line text editor widget.
pub struct TextEditor {
    /// Document content. Never empty; an empty document is one empty line.
    lines: Vec<String>,
    bounds: Rect,
    cursor: Point,
    first_visible: Point,
    read_only: bool,
}

impl TextEditor {
    /// Create an empty editor.
    pub fn new(bounds: Rect) -> Self {
        Self {
            lines: vec![String::new()],
            bounds,
            cursor: Point::ORIGIN,
            first_visible: Point::ORIGIN,
            read_only: false,
        }
    }

    /// Whether edits are suppressed.
    #[inline]
    pub const fn read_only(&self) -> bool {
        self.read_only
    }

    /// Suppress or allow edits. A read-only editor still navigates.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The cursor position as (column, line).
    #[inline]
    pub const fn cursor(&self) -> Point {
        self.cursor
    }

    /// The document lines.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The document joined with `'\n'`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the document, splitting on `'\n'` and tolerating `"\r\n"`.
    ///
    /// The cursor is clamped into the new document; the viewport origin is
    /// reset so drawing re-derives it.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.first_visible = Point::ORIGIN;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor.y >= self.lines.len() {
            self.cursor.y = self.lines.len() - 1;
        }
        let len = self.line_len(self.cursor.y);
        if self.cursor.x > len {
            self.cursor.x = len;
        }
    }

    #[inline]
    fn line_len(&self, y: usize) -> usize {
        self.lines[y].chars().count()
    }

    /// Pull the viewport origin so the cursor cell falls inside the bounds.
    fn follow_cursor(&mut self) {
        let height = usize::from(self.bounds.height);
        let width = usize::from(self.bounds.width);

        if self.cursor.y >= self.first_visible.y + height {
            self.first_visible.y = self.cursor.y + 1 - height;
        } else if self.cursor.y < self.first_visible.y {
            self.first_visible.y = self.cursor.y;
        }

        if self.cursor.x >= self.first_visible.x + width {
            self.first_visible.x = self.cursor.x + 1 - width;
        } else if self.cursor.x < self.first_visible.x {
            self.first_visible.x = self.cursor.x;
        }
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor.y];
        let byte = line
            .char_indices()
            .nth(self.cursor.x)
            .map_or(line.len(), |(i, _)| i);
        line.insert(byte, c);
        self.cursor.x += 1;
    }

    fn remove_char(&mut self, y: usize, x: usize) {
        let line = &mut self.lines[y];
        if let Some((byte, _)) = line.char_indices().nth(x) {
            line.remove(byte);
        }
    }

    /// Join line `y + 1` onto the end of line `y`.
    fn join_lines(&mut self, y: usize) {
        let tail = self.lines.remove(y + 1);
        self.lines[y].push_str(&tail);
    }
}

impl Widget for TextEditor {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn draw(&mut self, screen: &mut ScreenBuffer) -> Result<(), GeometryError> {
        if self.bounds.is_empty() {
            return Ok(());
        }

        screen.set_colors(Color::Gray, Color::Black);
        screen.clear_rect(self.bounds)?;
        self.follow_cursor();

        let width = usize::from(self.bounds.width);
        let mut y = self.bounds.top;

        for row in self.first_visible.y..self.lines.len() {
            let line: String = self.lines[row]
                .chars()
                .skip(self.first_visible.x)
                .take(width)
                .collect();

            screen.set_cursor(self.bounds.left, y)?;

            let cursor_here = row == self.cursor.y
                && self.cursor.x >= self.first_visible.x
                && self.cursor.x < self.first_visible.x + width;

            if cursor_here {
                let offset = self.cursor.x - self.first_visible.x;
                let before: String = line.chars().take(offset).collect();
                let under = line.chars().nth(offset);
                let after: String = line.chars().skip(offset + 1).collect();

                screen.write_str(&before);
                screen.set_colors(Color::Black, Color::Gray);
                screen.write_char(under.unwrap_or('\0'));
                screen.set_colors(Color::Gray, Color::Black);
                screen.write_str(&after);
            } else {
                screen.write_str(&line);
            }

            y += 1;
            if y >= self.bounds.bottom() {
                break;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let last_line = self.lines.len() - 1;
        let line_len = self.line_len(self.cursor.y);
        let page = usize::from(self.bounds.height);

        match event.code {
            KeyCode::Right => {
                if self.cursor.x < line_len {
                    self.cursor.x += 1;
                } else if self.cursor.y < last_line {
                    self.cursor.y += 1;
                    self.cursor.x = 0;
                } else {
                    return false;
                }
                true
            }

            KeyCode::Left => {
                if self.cursor.x > 0 {
                    self.cursor.x -= 1;
                } else if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                    self.cursor.x = self.line_len(self.cursor.y);
                } else {
                    return false;
                }
                true
            }

            KeyCode::Up => {
                if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                    self.clamp_cursor();
                } else if self.cursor.x > 0 {
                    // First line: up homes the cursor.
                    self.cursor.x = 0;
                } else {
                    return false;
                }
                true
            }

            KeyCode::Down => {
                if self.cursor.y < last_line {
                    self.cursor.y += 1;
                    self.clamp_cursor();
                } else if self.cursor.x < line_len {
                    // Last line: down ends the cursor.
                    self.cursor.x = line_len;
                } else {
                    return false;
                }
                true
            }

            KeyCode::Home if event.modifiers.control => {
                if self.cursor == Point::ORIGIN {
                    return false;
                }
                self.cursor = Point::ORIGIN;
                true
            }

            KeyCode::Home => {
                if self.cursor.x == 0 {
                    return false;
                }
                self.cursor.x = 0;
                true
            }

            KeyCode::End if event.modifiers.control => {
                let end = Point::new(self.line_len(last_line), last_line);
                if self.cursor == end {
                    return false;
                }
                self.cursor = end;
                true
            }

            KeyCode::End => {
                if self.cursor.x == line_len {
                    return false;
                }
                self.cursor.x = line_len;
                true
            }

            KeyCode::PageUp => {
                if self.cursor.y == 0 {
                    return false;
                }
                self.cursor.y = self.cursor.y.saturating_sub(page);
                self.clamp_cursor();
                true
            }

            KeyCode::PageDown => {
                if self.cursor.y >= last_line {
                    return false;
                }
                self.cursor.y = (self.cursor.y + page).min(last_line);
                self.clamp_cursor();
                true
            }

            KeyCode::Delete if !self.read_only => {
                if self.cursor.x < line_len {
                    self.remove_char(self.cursor.y, self.cursor.x);
                } else if self.cursor.y < last_line {
                    self.join_lines(self.cursor.y);
                } else {
                    return false;
                }
                true
            }

            KeyCode::Backspace if !self.read_only => {
                if self.cursor.x > 0 {
                    self.remove_char(self.cursor.y, self.cursor.x - 1);
                    self.cursor.x -= 1;
                } else if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                    self.cursor.x = self.line_len(self.cursor.y);
                    self.join_lines(self.cursor.y);
                } else {
                    return false;
                }
                true
            }

            KeyCode::Enter if !self.read_only => {
                let line = &self.lines[self.cursor.y];
                let byte = line
                    .char_indices()
                    .nth(self.cursor.x)
                    .map_or(line.len(), |(i, _)| i);
                let tail = self.lines[self.cursor.y].split_off(byte);
                self.lines.insert(self.cursor.y + 1, tail);
                self.cursor.x = 0;
                self.cursor.y += 1;
                true
            }

            KeyCode::Char('k' | 'K') if event.modifiers.control && !self.read_only => {
                self.lines.remove(self.cursor.y);
                if self.lines.is_empty() {
                    self.lines.push(String::new());
                }
                self.clamp_cursor();
                true
            }

            KeyCode::Char(c) if !event.modifiers.control && !self.read_only => {
                self.insert_char(c);
                true
            }

            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyEvent;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::ctrl(code)
    }

    fn editor_with(text: &str) -> TextEditor {
        let mut ed = TextEditor::new(Rect::new(0, 0, 10, 4));
        ed.set_text(text);
        ed
    }

    #[test]
    fn test_empty_editor_is_one_empty_line() {
        let ed = TextEditor::new(Rect::new(0, 0, 10, 4));
        assert_eq!(ed.lines(), &[String::new()]);
        assert_eq!(ed.text(), "");
    }

    #[test]
    fn test_set_text_tolerates_crlf() {
        let ed = editor_with("one\r\ntwo\nthree");
        assert_eq!(ed.lines(), &["one", "two", "three"]);
        assert_eq!(ed.text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut ed = editor_with("ac");
        assert!(ed.handle_key(&plain(KeyCode::Right)));
        assert!(ed.handle_key(&plain(KeyCode::Char('b'))));
        assert_eq!(ed.text(), "abc");
        assert_eq!(ed.cursor(), Point::new(2, 0));
    }

    #[test]
    fn test_enter_splits_then_backspace_rejoins() {
        let mut ed = editor_with("hello");
        ed.handle_key(&plain(KeyCode::Right));
        ed.handle_key(&plain(KeyCode::Right));
        assert!(ed.handle_key(&plain(KeyCode::Enter)));
        assert_eq!(ed.lines(), &["he", "llo"]);
        assert_eq!(ed.cursor(), Point::new(0, 1));

        assert!(ed.handle_key(&plain(KeyCode::Backspace)));
        assert_eq!(ed.text(), "hello");
        assert_eq!(ed.cursor(), Point::new(2, 0));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut ed = editor_with("x");
        assert!(!ed.handle_key(&plain(KeyCode::Backspace)));
        assert_eq!(ed.text(), "x");
    }

    #[test]
    fn test_delete_joins_next_line_at_line_end() {
        let mut ed = editor_with("ab\ncd");
        ed.handle_key(&plain(KeyCode::End));
        assert!(ed.handle_key(&plain(KeyCode::Delete)));
        assert_eq!(ed.text(), "abcd");
        // At document end, delete is a no-op.
        ed.handle_key(&ctrl(KeyCode::End));
        assert!(!ed.handle_key(&plain(KeyCode::Delete)));
    }

    #[test]
    fn test_arrows_cross_line_boundaries() {
        let mut ed = editor_with("ab\ncde");
        ed.handle_key(&plain(KeyCode::End));
        assert!(ed.handle_key(&plain(KeyCode::Right)));
        assert_eq!(ed.cursor(), Point::new(0, 1));

        assert!(ed.handle_key(&plain(KeyCode::Left)));
        assert_eq!(ed.cursor(), Point::new(2, 0));
    }

    #[test]
    fn test_up_down_clamp_to_shorter_lines() {
        let mut ed = editor_with("abcdef\nxy\nlonger");
        ed.handle_key(&plain(KeyCode::End));
        assert_eq!(ed.cursor(), Point::new(6, 0));

        ed.handle_key(&plain(KeyCode::Down));
        assert_eq!(ed.cursor(), Point::new(2, 1));

        // Down onto the last line keeps the unclamped target column rule of
        // a fresh clamp, not a remembered column.
        ed.handle_key(&plain(KeyCode::Down));
        assert_eq!(ed.cursor(), Point::new(2, 2));
    }

    #[test]
    fn test_up_on_first_line_homes_and_down_on_last_line_ends() {
        let mut ed = editor_with("abc");
        ed.handle_key(&plain(KeyCode::Right));
        assert!(ed.handle_key(&plain(KeyCode::Up)));
        assert_eq!(ed.cursor(), Point::new(0, 0));
        assert!(!ed.handle_key(&plain(KeyCode::Up)));

        assert!(ed.handle_key(&plain(KeyCode::Down)));
        assert_eq!(ed.cursor(), Point::new(3, 0));
        assert!(!ed.handle_key(&plain(KeyCode::Down)));
    }

    #[test]
    fn test_ctrl_home_and_end_jump_document() {
        let mut ed = editor_with("one\ntwo\nthree");
        assert!(ed.handle_key(&ctrl(KeyCode::End)));
        assert_eq!(ed.cursor(), Point::new(5, 2));
        assert!(!ed.handle_key(&ctrl(KeyCode::End)));

        assert!(ed.handle_key(&ctrl(KeyCode::Home)));
        assert_eq!(ed.cursor(), Point::ORIGIN);
        assert!(!ed.handle_key(&ctrl(KeyCode::Home)));
    }

    #[test]
    fn test_paging_moves_by_bounds_height() {
        let text: String = (0..10).map(|i| format!("line{i}\n")).collect();
        let mut ed = editor_with(text.trim_end());
        // Height is 4.
        assert!(ed.handle_key(&plain(KeyCode::PageDown)));
        assert_eq!(ed.cursor().y, 4);
        assert!(ed.handle_key(&plain(KeyCode::PageDown)));
        assert_eq!(ed.cursor().y, 8);
        assert!(ed.handle_key(&plain(KeyCode::PageDown)));
        assert_eq!(ed.cursor().y, 9);
        assert!(!ed.handle_key(&plain(KeyCode::PageDown)));

        assert!(ed.handle_key(&plain(KeyCode::PageUp)));
        assert_eq!(ed.cursor().y, 5);
    }

    #[test]
    fn test_ctrl_k_deletes_line_and_clamps_cursor() {
        let mut ed = editor_with("first\nsecond");
        ed.handle_key(&ctrl(KeyCode::End));
        assert!(ed.handle_key(&ctrl(KeyCode::Char('k'))));
        assert_eq!(ed.text(), "first");
        assert_eq!(ed.cursor(), Point::new(5, 0));

        // Deleting the only line leaves an empty document.
        assert!(ed.handle_key(&ctrl(KeyCode::Char('k'))));
        assert_eq!(ed.lines(), &[String::new()]);
        assert_eq!(ed.cursor(), Point::ORIGIN);
    }

    #[test]
    fn test_read_only_suppresses_all_mutations() {
        let mut ed = editor_with("keep\nme");
        ed.set_read_only(true);

        assert!(!ed.handle_key(&plain(KeyCode::Char('x'))));
        assert!(!ed.handle_key(&plain(KeyCode::Enter)));
        assert!(!ed.handle_key(&plain(KeyCode::Delete)));
        assert!(!ed.handle_key(&ctrl(KeyCode::Char('k'))));
        ed.handle_key(&ctrl(KeyCode::End));
        assert!(!ed.handle_key(&plain(KeyCode::Backspace)));
        assert_eq!(ed.text(), "keep\nme");

        // Navigation still works.
        assert!(ed.handle_key(&ctrl(KeyCode::Home)));
    }

    #[test]
    fn test_draw_inverts_cursor_cell() {
        let mut screen = ScreenBuffer::new(20, 6);
        let mut ed = editor_with("abc");
        ed.handle_key(&plain(KeyCode::Right));
        ed.draw(&mut screen).unwrap();

        assert_eq!(screen.text(0, 0, 3), "abc");
        let under = screen.cell(1, 0).unwrap();
        assert_eq!(under.fg, Color::Black);
        assert_eq!(under.bg, Color::Gray);
        let beside = screen.cell(0, 0).unwrap();
        assert_eq!(beside.fg, Color::Gray);
        assert_eq!(beside.bg, Color::Black);
    }

    #[test]
    fn test_draw_cursor_past_line_end_is_inverted_blank() {
        let mut screen = ScreenBuffer::new(20, 6);
        let mut ed = editor_with("ab");
        ed.handle_key(&plain(KeyCode::End));
        ed.draw(&mut screen).unwrap();

        let under = screen.cell(2, 0).unwrap();
        assert_eq!(under.ch, '\0');
        assert_eq!(under.glyph(), ' ');
        assert_eq!(under.bg, Color::Gray);
    }

    #[test]
    fn test_viewport_follows_cursor() {
        let text: String = (0..10).map(|i| format!("row{i}\n")).collect();
        let mut screen = ScreenBuffer::new(20, 6);
        let mut ed = editor_with(text.trim_end());

        ed.handle_key(&ctrl(KeyCode::End));
        ed.draw(&mut screen).unwrap();
        // Height 4: rows 6..=9 visible, cursor line at the bottom row.
        assert_eq!(screen.text(0, 0, 4), "row6");
        assert_eq!(screen.text(0, 3, 4), "row9");

        ed.handle_key(&ctrl(KeyCode::Home));
        ed.draw(&mut screen).unwrap();
        assert_eq!(screen.text(0, 0, 4), "row0");
    }

    #[test]
    fn test_viewport_follows_cursor_horizontally() {
        let mut screen = ScreenBuffer::new(20, 6);
        let mut ed = editor_with("abcdefghijklmnop");
        // Width 10; End puts the cursor at column 16.
        ed.handle_key(&plain(KeyCode::End));
        ed.draw(&mut screen).unwrap();

        // Window starts at column 7 so the insertion point is the last cell.
        assert_eq!(screen.text(0, 0, 9), "hijklmnop");
        assert_eq!(screen.cell(9, 0).unwrap().bg, Color::Gray);
    }
}
