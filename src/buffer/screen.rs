//! `ScreenBuffer`: The full-screen grid of cells behind every widget.
//!
//! The buffer stores cells in a contiguous `Vec` in row-major order and
//! tracks a logical cursor plus the "current" foreground/background colors
//! that tag every subsequent write. Rendering walks the grid once and emits
//! a color escape only when a cell's colors differ from the previously
//! emitted pair, so a mostly-uniform screen costs little more than its
//! glyphs.

use super::cell::{glyph, Cell, Color};
use crate::error::GeometryError;
use crate::layout::Rect;
use crate::terminal::OutputBuffer;
use std::io::{self, Write};

/// A `width x height` grid of [`Cell`]s with a logical cursor.
///
/// # Cursor invariant
///
/// `set_cursor` only accepts positions inside the grid. A write that fills a
/// row leaves the cursor resting at `x == width` until the next write wraps
/// it to the following row; a write that runs past the bottom-right corner
/// stops silently and parks the cursor at `y == height`, where further
/// writes are no-ops until the caller re-homes it. That clamp is deliberate:
/// overflowing the last row is how full-width fills end, not an error.
pub struct ScreenBuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Logical cursor column.
    cursor_x: u16,
    /// Logical cursor row.
    cursor_y: u16,
    /// Current foreground, applied to every written cell.
    fg: Color,
    /// Current background, applied to every written cell.
    bg: Color,
}

impl ScreenBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells start blank (null glyph, gray on black).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(
            width > 0 && height > 0,
            "ScreenBuffer dimensions must be non-zero"
        );
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::BLANK; size],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            fg: Color::DEFAULT_FG,
            bg: Color::DEFAULT_BG,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the logical cursor column.
    #[inline]
    pub const fn cursor_x(&self) -> u16 {
        self.cursor_x
    }

    /// Get the logical cursor row.
    #[inline]
    pub const fn cursor_y(&self) -> u16 {
        self.cursor_y
    }

    /// Get the current foreground color.
    #[inline]
    pub const fn fg(&self) -> Color {
        self.fg
    }

    /// Get the current background color.
    #[inline]
    pub const fn bg(&self) -> Color {
        self.bg
    }

    /// Set the current foreground color for subsequent writes.
    #[inline]
    pub fn set_fg(&mut self, fg: Color) {
        self.fg = fg;
    }

    /// Set the current background color for subsequent writes.
    #[inline]
    pub fn set_bg(&mut self, bg: Color) {
        self.bg = bg;
    }

    /// Set both current colors at once.
    #[inline]
    pub fn set_colors(&mut self, fg: Color, bg: Color) {
        self.fg = fg;
        self.bg = bg;
    }

    /// Move the logical cursor.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::CursorOutOfBounds`] unless
    /// `x < width && y < height`. Positioning is a contract, not a clamp.
    pub fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), GeometryError> {
        if x >= self.width || y >= self.height {
            return Err(GeometryError::CursorOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.cursor_x = x;
        self.cursor_y = y;
        Ok(())
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Get the cell at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index_of(x, y)])
        } else {
            None
        }
    }

    /// Read back `len` glyphs starting at `(x, y)` as a string.
    ///
    /// Null cells read as spaces; the range is clipped to the row end.
    /// Mostly useful for assertions against rendered widget output.
    pub fn text(&self, x: u16, y: u16, len: u16) -> String {
        let end = x.saturating_add(len).min(self.width);
        (x..end)
            .filter_map(|col| self.cell(col, y))
            .map(Cell::glyph)
            .collect()
    }

    /// Write a string at the cursor, tagging cells with the current colors.
    ///
    /// Wraps to column 0 of the next row at the right edge; stops silently
    /// past the last row.
    pub fn write_str(&mut self, text: &str) {
        let mut x = self.cursor_x;
        let mut y = self.cursor_y;

        for c in text.chars() {
            if x == self.width {
                x = 0;
                y += 1;
            }
            if y >= self.height {
                break;
            }

            let idx = self.index_of(x, y);
            self.cells[idx] = Cell::new(c, self.fg, self.bg);
            x += 1;
        }

        self.cursor_x = x;
        self.cursor_y = y.min(self.height);
    }

    /// Write one character at the cursor.
    #[inline]
    pub fn write_char(&mut self, c: char) {
        self.write_repeat(c, 1);
    }

    /// Write `count` copies of a character at the cursor.
    ///
    /// Same wrapping and clamping rules as [`write_str`](Self::write_str).
    pub fn write_repeat(&mut self, c: char, count: usize) {
        let mut x = self.cursor_x;
        let mut y = self.cursor_y;

        for _ in 0..count {
            if x == self.width {
                x = 0;
                y += 1;
            }
            if y >= self.height {
                break;
            }

            let idx = self.index_of(x, y);
            self.cells[idx] = Cell::new(c, self.fg, self.bg);
            x += 1;
        }

        self.cursor_x = x;
        self.cursor_y = y.min(self.height);
    }

    fn check_rect(&self, rect: Rect) -> Result<(), GeometryError> {
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(GeometryError::RectOutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Fill a rectangular region with one character in the current colors.
    ///
    /// Does not move the cursor.
    ///
    /// # Errors
    ///
    /// Fails if the rectangle extends past the buffer edge.
    pub fn fill_rect(&mut self, c: char, rect: Rect) -> Result<(), GeometryError> {
        self.check_rect(rect)?;
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                let idx = self.index_of(x, y);
                self.cells[idx] = Cell::new(c, self.fg, self.bg);
            }
        }
        Ok(())
    }

    /// Blank a rectangular region row by row with null cells.
    ///
    /// # Errors
    ///
    /// Fails if the rectangle extends past the buffer edge.
    pub fn clear_rect(&mut self, rect: Rect) -> Result<(), GeometryError> {
        self.check_rect(rect)?;
        if rect.is_empty() {
            return Ok(());
        }
        for y in rect.top..rect.bottom() {
            self.set_cursor(rect.left, y)?;
            self.write_repeat('\0', usize::from(rect.width));
        }
        Ok(())
    }

    /// Paint a box around a rectangle with box-drawing glyphs.
    ///
    /// Top and bottom rows are drawn as one run each; side columns cell by
    /// cell. `double_lined` selects the double-line glyph set including the
    /// matching corner pieces.
    ///
    /// # Errors
    ///
    /// Fails if the rectangle extends past the buffer edge.
    pub fn draw_rect(&mut self, rect: Rect, double_lined: bool) -> Result<(), GeometryError> {
        self.check_rect(rect)?;
        if rect.is_empty() {
            return Ok(());
        }

        let (tl, tr, bl, br, horiz, vert) = if double_lined {
            (
                glyph::CORNER_TOP_LEFT_DBL,
                glyph::CORNER_TOP_RIGHT_DBL,
                glyph::CORNER_BOTTOM_LEFT_DBL,
                glyph::CORNER_BOTTOM_RIGHT_DBL,
                glyph::HORIZONTAL_LINE_DBL,
                glyph::VERTICAL_LINE_DBL,
            )
        } else {
            (
                glyph::CORNER_TOP_LEFT,
                glyph::CORNER_TOP_RIGHT,
                glyph::CORNER_BOTTOM_LEFT,
                glyph::CORNER_BOTTOM_RIGHT,
                glyph::HORIZONTAL_LINE,
                glyph::VERTICAL_LINE,
            )
        };
        let run = usize::from(rect.width.saturating_sub(2));

        self.set_cursor(rect.left, rect.top)?;
        self.write_char(tl);
        self.write_repeat(horiz, run);
        self.write_char(tr);

        self.set_cursor(rect.left, rect.bottom() - 1)?;
        self.write_char(bl);
        self.write_repeat(horiz, run);
        self.write_char(br);

        for y in (rect.top + 1)..(rect.bottom() - 1) {
            self.set_cursor(rect.left, y)?;
            self.write_char(vert);
            self.set_cursor(rect.right() - 1, y)?;
            self.write_char(vert);
        }
        Ok(())
    }

    /// Resize the buffer, preserving the overlapping top-left region.
    ///
    /// New cells are blank. The cursor is NOT clamped; callers re-home it
    /// before writing again.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        assert!(
            new_width > 0 && new_height > 0,
            "ScreenBuffer dimensions must be non-zero"
        );
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = usize::from(new_width) * usize::from(new_height);
        let mut new_cells = vec![Cell::BLANK; new_size];

        let copy_width = usize::from(self.width.min(new_width));
        let copy_height = usize::from(self.height.min(new_height));

        for y in 0..copy_height {
            let old_start = y * usize::from(self.width);
            let new_start = y * usize::from(new_width);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
    }

    /// Serialize the whole grid into a writer as one escape stream.
    ///
    /// Emits a reset-and-set color run only when a cell's colors differ from
    /// the previously emitted pair, substitutes a space for null glyphs, and
    /// finishes by re-homing the terminal cursor. The entire stream reaches
    /// the writer in a single `write` call.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn render_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut out = OutputBuffer::with_capacity(self.cells.len() * 2 + 64);
        let mut last_fg = Color::DEFAULT_FG;
        let mut last_bg = Color::DEFAULT_BG;

        out.cursor_home();
        out.set_colors(last_fg, last_bg);

        for cell in &self.cells {
            if cell.fg != last_fg || cell.bg != last_bg {
                last_fg = cell.fg;
                last_bg = cell.bg;
                out.set_colors(last_fg, last_bg);
            }
            out.write_char(cell.glyph());
        }

        out.cursor_home();
        out.flush_to(writer)
    }

    /// Render the grid to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn render(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render_to(&mut lock)
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cursor", &(self.cursor_x, self.cursor_y))
            .finish_non_exhaustive()
    }
}
