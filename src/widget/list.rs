//! List View: A scrolling item picker built on the grid.
//!
//! Items are laid out column-major: the first `height` items fill the first
//! column top to bottom, the next `height` the second column, and so on. The
//! layout is materialized as a [`DataTable`] fed to a list-mode
//! [`GridView`], with missing trailing cells left null so grid navigation
//! can skip them. Every mutation rebuilds the layout immediately unless a
//! [`begin_update`](ListView::begin_update) bracket is open.

use super::grid::GridView;
use super::traits::Widget;
use crate::actor::KeyEvent;
use crate::buffer::ScreenBuffer;
use crate::data::{DataTable, Value};
use crate::error::GeometryError;
use crate::layout::Rect;

/// Column-major item list over a list-mode grid.
pub struct ListView {
    grid: GridView,
    items: Vec<String>,
    updating: bool,
}

impl ListView {
    /// Create an empty list.
    pub fn new(bounds: Rect) -> Self {
        let mut list = Self {
            grid: GridView::new_list(bounds),
            items: Vec::new(),
            updating: false,
        };
        list.rebuild();
        list
    }

    /// The items in insertion order.
    #[inline]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The flat index of the selected item.
    ///
    /// Column-major: the selected grid cell `(x, y)` maps to
    /// `x * rows + y` where `rows` is the laid-out row count.
    pub fn selected_index(&self) -> usize {
        let cell = self.grid.selected_cell();
        let rows = self.grid.table().map_or(0, DataTable::row_count);
        cell.x * rows + cell.y
    }

    /// The selected item, if any.
    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected_index()).map(String::as_str)
    }

    /// Append an item.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
        self.invalidate();
    }

    /// Insert an item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: impl Into<String>) {
        self.items.insert(index, item.into());
        self.invalidate();
    }

    /// Remove and return the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> String {
        let item = self.items.remove(index);
        self.invalidate();
        item
    }

    /// Replace the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, item: impl Into<String>) {
        self.items[index] = item.into();
        self.invalidate();
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.invalidate();
    }

    /// Suspend layout rebuilds until [`end_update`](Self::end_update).
    pub fn begin_update(&mut self) {
        self.updating = true;
    }

    /// Close an update bracket and rebuild once.
    pub fn end_update(&mut self) {
        self.updating = false;
        self.rebuild();
    }

    fn invalidate(&mut self) {
        if !self.updating {
            self.rebuild();
        }
    }

    /// Re-derive the column-major table from the items and current bounds.
    pub fn rebuild(&mut self) {
        let height = usize::from(self.grid.bounds().height);
        if height == 0 || self.items.is_empty() {
            self.grid.replace_table(DataTable::default());
            self.grid.set_column_width(0);
            return;
        }

        let col_count = self.items.len().div_ceil(height);
        let row_count = height.min(self.items.len());

        let mut table =
            DataTable::with_columns((0..col_count).map(|i| format!("Col{i}")));
        let mut rows = vec![vec![Value::Null; col_count]; row_count];

        let mut width = 0;
        for (i, item) in self.items.iter().enumerate() {
            width = width.max(item.chars().count());
            rows[i % height][i / height] = Value::Text(item.clone());
        }
        for row in rows {
            table.push_row(row);
        }

        self.grid.replace_table(table);
        self.grid
            .set_column_width(u16::try_from(width).unwrap_or(u16::MAX));
    }
}

impl Widget for ListView {
    fn bounds(&self) -> Rect {
        self.grid.bounds()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.grid.set_bounds(bounds);
        self.invalidate();
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.grid.handle_key(event)
    }

    fn draw(&mut self, screen: &mut ScreenBuffer) -> Result<(), GeometryError> {
        self.grid.draw(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyCode;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn list_with(count: usize, height: u16) -> ListView {
        let mut list = ListView::new(Rect::new(0, 0, 40, height));
        list.begin_update();
        for i in 0..count {
            list.push(format!("item{i}"));
        }
        list.end_update();
        list
    }

    #[test]
    fn test_layout_is_column_major() {
        let list = list_with(7, 3);
        let table = list.grid.table().unwrap();

        // ceil(7 / 3) = 3 columns, 3 rows.
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.value(0, 0), Some(&Value::Text("item0".into())));
        assert_eq!(table.value(2, 0), Some(&Value::Text("item2".into())));
        assert_eq!(table.value(0, 1), Some(&Value::Text("item3".into())));
        assert_eq!(table.value(0, 2), Some(&Value::Text("item6".into())));
        // Trailing cells of the last column are null.
        assert_eq!(table.value(1, 2), Some(&Value::Null));
        assert_eq!(table.value(2, 2), Some(&Value::Null));
    }

    #[test]
    fn test_column_width_tracks_longest_item() {
        let mut list = ListView::new(Rect::new(0, 0, 40, 5));
        list.push("ab");
        list.push("abcdef");
        assert_eq!(list.grid.column_width(), 6);
    }

    #[test]
    fn test_selected_index_follows_downward_walk() {
        let mut list = list_with(7, 3);
        assert_eq!(list.selected_index(), 0);

        for k in 1..7 {
            assert!(list.handle_key(&plain(KeyCode::Down)), "step {k}");
            assert_eq!(list.selected_index(), k);
        }
        // item6 is the last one; further movement is refused.
        assert!(!list.handle_key(&plain(KeyCode::Down)));
        assert_eq!(list.selected_item(), Some("item6"));
    }

    #[test]
    fn test_mutation_outside_update_rebuilds_immediately() {
        let mut list = ListView::new(Rect::new(0, 0, 40, 3));
        list.push("a");
        assert_eq!(list.grid.table().unwrap().row_count(), 1);
        list.push("b");
        assert_eq!(list.grid.table().unwrap().row_count(), 2);

        list.remove(0);
        assert_eq!(list.items(), &["b"]);
        assert_eq!(list.grid.table().unwrap().row_count(), 1);
    }

    #[test]
    fn test_update_bracket_defers_rebuild() {
        let mut list = ListView::new(Rect::new(0, 0, 40, 3));
        list.begin_update();
        list.push("a");
        list.push("b");
        list.push("c");
        list.push("d");
        assert_eq!(list.grid.table().map_or(0, DataTable::row_count), 0);

        list.end_update();
        let table = list.grid.table().unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_empty_and_zero_height_layouts() {
        let list = ListView::new(Rect::new(0, 0, 40, 3));
        assert!(list.is_empty());
        assert_eq!(list.grid.table().unwrap().row_count(), 0);

        let mut flat = ListView::new(Rect::new(0, 0, 40, 0));
        flat.push("a");
        assert_eq!(flat.grid.table().unwrap().row_count(), 0);
        assert_eq!(flat.selected_index(), 0);
    }

    #[test]
    fn test_resize_relays_out_items() {
        let mut list = list_with(6, 3);
        assert_eq!(list.grid.table().unwrap().column_count(), 2);

        list.set_bounds(Rect::new(0, 0, 40, 6));
        assert_eq!(list.grid.table().unwrap().column_count(), 1);
        assert_eq!(list.grid.table().unwrap().row_count(), 6);
    }

    #[test]
    fn test_clear_empties_layout() {
        let mut list = list_with(5, 3);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.grid.table().unwrap().row_count(), 0);
    }

    #[test]
    fn test_draw_renders_columns_with_dividers() {
        let mut screen = ScreenBuffer::new(40, 5);
        let mut list = list_with(4, 3);
        list.draw(&mut screen).unwrap();

        // Width 5 items, divider between the two columns.
        assert_eq!(screen.text(0, 0, 11), "item0│item3");
        assert_eq!(screen.text(0, 1, 11), "item1│     ");
        assert_eq!(screen.text(0, 2, 11), "item2│     ");
    }
}
