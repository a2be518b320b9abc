//! Grid View: Tabular result-set viewer with a selected-cell cursor.
//!
//! Renders a [`DataTable`] into a bounded region: optional header row,
//! fixed-width columns with optional vertical-line dividers, a scrolled
//! viewport tracked by a first-visible cell, and an optional one-line detail
//! strip describing the selected cell. Arrow keys move the selection one
//! step and never jump the viewport by more than one step.
//!
//! The crate-internal list mode turns the grid into the backing store for
//! [`ListView`](super::ListView): header/details suppressed, null cells
//! rendered empty, and navigation treating the column-major table as one
//! continuous scroll (including the skip-past-null-trailing-cell rule of the
//! original, preserved as-is).

use super::traits::Widget;
use crate::actor::{KeyCode, KeyEvent};
use crate::buffer::{glyph, Color, ScreenBuffer};
use crate::data::{DataTable, Value};
use crate::error::GeometryError;
use crate::layout::{Point, Rect};

/// Default column width in cells.
const DEFAULT_COLUMN_WIDTH: u16 = 15;

/// Tabular viewer over a [`DataTable`].
pub struct GridView {
    table: Option<DataTable>,
    bounds: Rect,
    first_visible: Point,
    selected: Point,
    column_width: u16,
    draw_header: bool,
    draw_details: bool,
    draw_column_dividers: bool,
    list_mode: bool,
}

impl GridView {
    /// Create a grid over an optional table.
    pub fn new(table: Option<DataTable>, bounds: Rect) -> Self {
        Self {
            table,
            bounds,
            first_visible: Point::ORIGIN,
            selected: Point::ORIGIN,
            column_width: DEFAULT_COLUMN_WIDTH,
            draw_header: true,
            draw_details: true,
            draw_column_dividers: true,
            list_mode: false,
        }
    }

    /// Create a list-mode grid: no header, no details, dividers on.
    pub(crate) fn new_list(bounds: Rect) -> Self {
        Self {
            table: None,
            bounds,
            first_visible: Point::ORIGIN,
            selected: Point::ORIGIN,
            column_width: DEFAULT_COLUMN_WIDTH,
            draw_header: false,
            draw_details: false,
            draw_column_dividers: true,
            list_mode: true,
        }
    }

    /// The currently selected cell (column, row).
    #[inline]
    pub const fn selected_cell(&self) -> Point {
        self.selected
    }

    /// The viewport origin (first visible cell).
    #[inline]
    pub const fn first_visible_cell(&self) -> Point {
        self.first_visible
    }

    /// The table currently shown, if any.
    #[inline]
    pub const fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    /// Replace the table and reset the selection to the origin.
    ///
    /// The viewport origin is kept; callers that want a fresh view re-home
    /// it themselves.
    pub fn set_table(&mut self, table: DataTable) {
        self.table = Some(table);
        self.selected = Point::ORIGIN;
    }

    /// Replace the table keeping selection and viewport (list rebuilds).
    pub(crate) fn replace_table(&mut self, table: DataTable) {
        self.table = Some(table);
    }

    /// Uniform column width in cells.
    #[inline]
    pub const fn column_width(&self) -> u16 {
        self.column_width
    }

    /// Set the uniform column width.
    pub fn set_column_width(&mut self, width: u16) {
        self.column_width = width;
    }

    /// Toggle the header row.
    pub fn set_draw_header(&mut self, on: bool) {
        self.draw_header = on;
    }

    /// Toggle the detail strip.
    pub fn set_draw_details(&mut self, on: bool) {
        self.draw_details = on;
    }

    /// Toggle the vertical column dividers.
    pub fn set_draw_column_dividers(&mut self, on: bool) {
        self.draw_column_dividers = on;
    }

    /// The string form of a cell for display: null becomes `"NULL"` in grid
    /// mode and the empty string in list mode.
    fn cell_text(&self, value: &Value) -> String {
        if value.is_null() {
            if self.list_mode {
                String::new()
            } else {
                "NULL".to_string()
            }
        } else {
            value.to_string()
        }
    }

    /// Room left for a cell starting at the buffer cursor: the column width,
    /// clipped to the right edge of the bounds.
    fn space_left(&self, cursor_x: u16) -> usize {
        let space = usize::from(self.column_width);
        let right = usize::from(self.bounds.right());
        let cx = usize::from(cursor_x);
        space.min(right.saturating_sub(cx))
    }

    fn draw_grid_header(
        &self,
        table: &DataTable,
        screen: &mut ScreenBuffer,
    ) -> Result<(), GeometryError> {
        screen.set_cursor(self.bounds.left, self.bounds.top)?;
        screen.set_bg(Color::Black);

        for i in self.first_visible.x..table.column_count() {
            let space_left = self.space_left(screen.cursor_x());
            let Some(col) = table.column(i) else { break };
            let caption: String = col.name.chars().take(space_left).collect();

            screen.set_fg(Color::Yellow);
            screen.write_str(&caption);
            screen.write_repeat(' ', space_left.saturating_sub(caption.chars().count()));

            if screen.cursor_x() == self.bounds.right() {
                break;
            }
            screen.set_fg(Color::Gray);
            if self.draw_column_dividers {
                screen.write_char(glyph::VERTICAL_LINE);
            }
        }
        Ok(())
    }

    fn draw_rows(&self, table: &DataTable, screen: &mut ScreenBuffer) -> Result<(), GeometryError> {
        let header_offset = u16::from(self.draw_header);
        screen.set_cursor(self.bounds.left, self.bounds.top + header_offset)?;
        screen.set_colors(Color::Gray, Color::Black);

        let bottom_margin: i32 = if self.draw_details { 3 } else { 2 };

        for y in self.first_visible.y..table.row_count() {
            for x in self.first_visible.x..table.column_count() {
                let space_left = self.space_left(screen.cursor_x());
                let selected = x == self.selected.x && y == self.selected.y;

                if selected {
                    screen.set_colors(Color::Black, Color::Gray);
                } else {
                    screen.set_colors(Color::Gray, Color::Black);
                }

                let Some(value) = table.value(y, x) else { break };
                let text: String = self.cell_text(value).chars().take(space_left).collect();
                screen.write_str(&text);
                screen.write_repeat(' ', space_left.saturating_sub(text.chars().count()));

                if screen.cursor_x() == self.bounds.right() {
                    break;
                }
                if self.draw_column_dividers {
                    if selected {
                        screen.set_colors(Color::Gray, Color::Black);
                    }
                    screen.write_char(glyph::VERTICAL_LINE);
                }
            }

            if i32::from(screen.cursor_y()) > i32::from(self.bounds.bottom()) - bottom_margin {
                break;
            }
            screen.set_cursor(self.bounds.left, screen.cursor_y() + 1)?;
        }
        Ok(())
    }

    fn draw_details_strip(
        &self,
        table: &DataTable,
        screen: &mut ScreenBuffer,
    ) -> Result<(), GeometryError> {
        let (Some(col), Some(value)) = (
            table.column(self.selected.x),
            table.value(self.selected.y, self.selected.x),
        ) else {
            return Ok(());
        };

        screen.set_cursor(self.bounds.left, self.bounds.bottom() - 1)?;
        screen.set_colors(Color::Blue, Color::Black);

        let value_text = if value.is_null() {
            "NULL".to_string()
        } else {
            value.to_string().replace(['\r', '\n'], "")
        };
        let line = format!("{}|{}: {}", col.name, self.selected.y + 1, value_text);
        let line: String = line.chars().take(usize::from(self.bounds.width)).collect();

        screen.write_str(&line);
        screen.write_repeat(
            ' ',
            usize::from(self.bounds.width).saturating_sub(line.chars().count()),
        );
        Ok(())
    }

    /// Number of fully visible columns given width, column width, dividers.
    fn visible_columns(&self) -> usize {
        let stride = usize::from(self.column_width) + usize::from(self.draw_column_dividers);
        usize::from(self.bounds.width) / stride.max(1)
    }

    /// The last row index (relative to the viewport origin) that still fits.
    fn visible_row_limit(&self) -> i64 {
        i64::from(self.bounds.height) - if self.draw_details { 3 } else { 2 }
            + i64::from(!self.draw_header)
    }
}

impl Widget for GridView {
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
        screen.fill_rect('\0', self.bounds)?;

        let Some(table) = self.table.take() else {
            return Ok(());
        };

        if self.draw_header {
            self.draw_grid_header(&table, screen)?;
        }
        self.draw_rows(&table, screen)?;
        if self.draw_details
            && self.selected.y < table.row_count()
            && self.selected.x < table.column_count()
        {
            self.draw_details_strip(&table, screen)?;
        }

        self.table = Some(table);
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let Some(table) = &self.table else {
            return false;
        };
        let cols = table.column_count();
        let rows = table.row_count();
        if cols == 0 || rows == 0 {
            return false;
        }

        match event.code {
            KeyCode::Left if self.selected.x > 0 => {
                self.selected.x -= 1;
                if self.selected.x < self.first_visible.x {
                    self.first_visible.x -= 1;
                }
                true
            }

            KeyCode::Right if self.selected.x < cols - 1 => {
                self.selected.x += 1;
                if self.selected.x >= self.first_visible.x + self.visible_columns() {
                    self.first_visible.x += 1;
                }

                // List mode: landing on a null trailing cell of the last
                // column snaps back to the nearest earlier non-null row,
                // keeping the column-major scroll continuous.
                if self.list_mode
                    && self.selected.x == cols - 1
                    && table
                        .value(self.selected.y, self.selected.x)
                        .is_some_and(Value::is_null)
                {
                    for i in (0..self.selected.y).rev() {
                        if table.value(i, self.selected.x).is_some_and(|v| !v.is_null()) {
                            self.selected.y = i;
                            break;
                        }
                    }
                }
                true
            }

            KeyCode::Up if self.selected.y > 0 => {
                self.selected.y -= 1;
                if self.selected.y < self.first_visible.y {
                    self.first_visible.y -= 1;
                }
                true
            }

            KeyCode::Down
                if self.selected.y < rows - 1
                    && !(self.list_mode
                        && self.selected.x == cols - 1
                        && table
                            .value(self.selected.y + 1, self.selected.x)
                            .is_some_and(Value::is_null)) =>
            {
                self.selected.y += 1;
                let limit = self.first_visible.y as i64 + self.visible_row_limit();
                if self.selected.y as i64 > limit {
                    self.first_visible.y += 1;
                }
                true
            }

            // List mode wrap: down from a column's end continues at the top
            // of the next column; up from a column's top continues at the
            // bottom of the previous one.
            KeyCode::Down if self.list_mode && self.selected.x < cols - 1 => {
                self.selected.x += 1;
                self.selected.y = 0;
                true
            }

            KeyCode::Up if self.list_mode && self.selected.x > 0 => {
                self.selected.x -= 1;
                self.selected.y = rows - 1;
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

    fn sample_table() -> DataTable {
        let mut table = DataTable::with_columns(["name", "count"]);
        table.push_row(vec![Value::from("a"), Value::from("1")]);
        table.push_row(vec![Value::from("bb"), Value::from("22")]);
        table.push_row(vec![Value::from("ccc"), Value::Null]);
        table
    }

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn test_render_rows_with_dividers_and_null() {
        let mut screen = ScreenBuffer::new(20, 6);
        let mut grid = GridView::new(Some(sample_table()), Rect::new(0, 0, 11, 6));
        grid.set_column_width(5);
        grid.set_draw_header(false);
        grid.set_draw_details(false);
        grid.draw(&mut screen).unwrap();

        assert_eq!(screen.text(0, 0, 11), "a    │1    ");
        assert_eq!(screen.text(0, 1, 11), "bb   │22   ");
        assert_eq!(screen.text(0, 2, 11), "ccc  │NULL ");
    }

    #[test]
    fn test_list_mode_renders_null_as_spaces() {
        let mut screen = ScreenBuffer::new(20, 6);
        let mut grid = GridView::new_list(Rect::new(0, 0, 11, 6));
        grid.replace_table(sample_table());
        grid.set_column_width(5);
        grid.draw(&mut screen).unwrap();

        assert_eq!(screen.text(0, 2, 11), "ccc  │     ");
    }

    #[test]
    fn test_header_and_details() {
        let mut screen = ScreenBuffer::new(30, 8);
        let mut grid = GridView::new(Some(sample_table()), Rect::new(0, 0, 13, 8));
        grid.set_column_width(6);
        grid.draw(&mut screen).unwrap();

        assert_eq!(screen.text(0, 0, 13), "name  │count ");
        assert_eq!(screen.cell(0, 0).unwrap().fg, Color::Yellow);
        // First data row below the header, selected cell inverted.
        assert_eq!(screen.text(0, 1, 13), "a     │1     ");
        assert_eq!(screen.cell(0, 1).unwrap().fg, Color::Black);
        assert_eq!(screen.cell(0, 1).unwrap().bg, Color::Gray);
        // Detail strip on the last bounds row: column|row: value.
        assert_eq!(screen.text(0, 7, 10), "name|1: a ");
        assert_eq!(screen.cell(0, 7).unwrap().fg, Color::Blue);
    }

    #[test]
    fn test_details_shows_null_marker() {
        let mut screen = ScreenBuffer::new(30, 8);
        let mut grid = GridView::new(Some(sample_table()), Rect::new(0, 0, 13, 8));
        grid.set_column_width(6);
        grid.handle_key(&plain(KeyCode::Right));
        grid.handle_key(&plain(KeyCode::Down));
        grid.handle_key(&plain(KeyCode::Down));
        grid.draw(&mut screen).unwrap();

        assert_eq!(screen.text(0, 7, 14), "count|3: NULL ");
    }

    #[test]
    fn test_navigation_refuses_past_edges() {
        let mut grid = GridView::new(Some(sample_table()), Rect::new(0, 0, 40, 10));

        assert!(!grid.handle_key(&plain(KeyCode::Left)));
        assert!(!grid.handle_key(&plain(KeyCode::Up)));

        assert!(grid.handle_key(&plain(KeyCode::Right)));
        assert_eq!(grid.selected_cell(), Point::new(1, 0));
        // Last column: moving right is a no-op.
        assert!(!grid.handle_key(&plain(KeyCode::Right)));
        assert_eq!(grid.selected_cell(), Point::new(1, 0));

        assert!(grid.handle_key(&plain(KeyCode::Down)));
        assert!(grid.handle_key(&plain(KeyCode::Down)));
        assert!(!grid.handle_key(&plain(KeyCode::Down)));
        assert_eq!(grid.selected_cell(), Point::new(1, 2));
    }

    #[test]
    fn test_horizontal_scroll_keeps_selection_visible() {
        let mut table = DataTable::with_columns(["a", "b", "c", "d", "e"]);
        table.push_row(vec![Value::from("1"); 5]);
        // Width 32, column stride 16: two visible columns.
        let mut grid = GridView::new(Some(table), Rect::new(0, 0, 32, 5));

        for _ in 0..4 {
            assert!(grid.handle_key(&plain(KeyCode::Right)));
            let offset = grid.selected_cell().x - grid.first_visible_cell().x;
            assert!(offset < grid.visible_columns());
        }
        assert_eq!(grid.selected_cell().x, 4);
        assert_eq!(grid.first_visible_cell().x, 3);

        for _ in 0..4 {
            assert!(grid.handle_key(&plain(KeyCode::Left)));
            assert!(grid.first_visible_cell().x <= grid.selected_cell().x);
        }
        assert_eq!(grid.first_visible_cell().x, 0);
    }

    #[test]
    fn test_vertical_scroll_steps_by_one() {
        let mut table = DataTable::with_columns(["n"]);
        for i in 0..20 {
            table.push_row(vec![Value::Integer(i)]);
        }
        // Height 6, header + details on: 5 rows visible at most.
        let mut grid = GridView::new(Some(table), Rect::new(0, 0, 20, 6));

        let mut last_first = 0;
        for _ in 0..19 {
            assert!(grid.handle_key(&plain(KeyCode::Down)));
            let first = grid.first_visible_cell().y;
            assert!(first == last_first || first == last_first + 1);
            last_first = first;
        }
        assert_eq!(grid.selected_cell().y, 19);
    }

    #[test]
    fn test_set_table_resets_selection() {
        let mut grid = GridView::new(Some(sample_table()), Rect::new(0, 0, 40, 10));
        grid.handle_key(&plain(KeyCode::Down));
        grid.handle_key(&plain(KeyCode::Right));
        assert_ne!(grid.selected_cell(), Point::ORIGIN);

        grid.set_table(sample_table());
        assert_eq!(grid.selected_cell(), Point::ORIGIN);
    }

    fn list_table() -> DataTable {
        // Column-major layout of 5 items over 2 columns x 3 rows; the
        // trailing cell (row 2 of the last column) is null.
        let mut table = DataTable::with_columns(["Col0", "Col1"]);
        table.push_row(vec![Value::from("item0"), Value::from("item3")]);
        table.push_row(vec![Value::from("item1"), Value::from("item4")]);
        table.push_row(vec![Value::from("item2"), Value::Null]);
        table
    }

    #[test]
    fn test_list_mode_right_snaps_off_null_trailing_cell() {
        let mut grid = GridView::new_list(Rect::new(0, 0, 40, 5));
        grid.replace_table(list_table());
        grid.handle_key(&plain(KeyCode::Down));
        grid.handle_key(&plain(KeyCode::Down));
        assert_eq!(grid.selected_cell(), Point::new(0, 2));

        // Right from (0,2) lands on the null cell (1,2) and snaps up to the
        // last populated row of that column.
        assert!(grid.handle_key(&plain(KeyCode::Right)));
        assert_eq!(grid.selected_cell(), Point::new(1, 1));
    }

    #[test]
    fn test_list_mode_down_refused_onto_null_then_wraps_columns() {
        let mut grid = GridView::new_list(Rect::new(0, 0, 40, 5));
        grid.replace_table(list_table());

        // Walk down the first column, wrap to the second.
        assert!(grid.handle_key(&plain(KeyCode::Down)));
        assert!(grid.handle_key(&plain(KeyCode::Down)));
        assert!(grid.handle_key(&plain(KeyCode::Down)));
        assert_eq!(grid.selected_cell(), Point::new(1, 0));

        // Down once more is fine; down onto the null trailing cell wraps
        // nowhere (last column) and is refused.
        assert!(grid.handle_key(&plain(KeyCode::Down)));
        assert_eq!(grid.selected_cell(), Point::new(1, 1));
        assert!(!grid.handle_key(&plain(KeyCode::Down)));

        // Up from the top of the second column wraps to the bottom of the
        // first.
        grid.handle_key(&plain(KeyCode::Up));
        assert!(grid.handle_key(&plain(KeyCode::Up)));
        assert_eq!(grid.selected_cell(), Point::new(0, 2));
    }
}
