//! Query View: A split editor-over-results workspace for one statement.
//!
//! The upper half is a [`TextEditor`] holding the statement, the lower half
//! shows either the result grid or a read-only message pane, separated by a
//! horizontal rule carrying a centered `" Result "` label (yellow while the
//! result pane has focus). F5 executes the statement: text whose trimmed
//! form starts with `select` (any case) routes to the query callback and
//! fills the grid; everything else routes to the non-query callback and
//! reports `"{n} row(s) affected."` in the message pane. Failures pin the
//! message pane until the next successful query.

use super::editor::TextEditor;
use super::grid::GridView;
use super::traits::Widget;
use crate::actor::{KeyCode, KeyEvent};
use crate::buffer::{glyph, Color, ScreenBuffer};
use crate::data::DataTable;
use crate::error::{DataError, GeometryError};
use crate::layout::Rect;
use tracing::debug;

/// Callback producing a result table for a `select`-like statement.
pub type QueryFn = Box<dyn FnMut(&str) -> Result<DataTable, DataError> + Send>;

/// Callback executing a non-query statement, returning the affected count.
pub type ExecFn = Box<dyn FnMut(&str) -> Result<u64, DataError> + Send>;

const RESULT_LABEL: &str = " Result ";

/// Statement editor with an attached result pane.
pub struct QueryView {
    bounds: Rect,
    editor: TextEditor,
    grid: GridView,
    message: TextEditor,
    execute_query: QueryFn,
    execute_non_query: ExecFn,
    result_focused: bool,
    view_message: bool,
}

impl QueryView {
    /// Create a query view, executing `initial_query` immediately if given.
    pub fn new(
        initial_query: Option<&str>,
        execute_query: QueryFn,
        execute_non_query: ExecFn,
        bounds: Rect,
    ) -> Self {
        let mut editor = TextEditor::new(Rect::ZERO);
        if let Some(q) = initial_query {
            editor.set_text(q);
        }
        let mut message = TextEditor::new(Rect::ZERO);
        message.set_read_only(true);

        let mut view = Self {
            bounds,
            editor,
            grid: GridView::new(None, Rect::ZERO),
            message,
            execute_query,
            execute_non_query,
            result_focused: false,
            view_message: false,
        };
        view.layout();
        if let Some(q) = initial_query {
            if !q.is_empty() {
                view.run_query(q.to_string());
            }
        }
        view
    }

    /// The statement text.
    pub fn query_text(&self) -> String {
        self.editor.text()
    }

    /// Replace the statement text.
    pub fn set_query_text(&mut self, text: &str) {
        self.editor.set_text(text);
    }

    /// Whether the result pane has focus.
    #[inline]
    pub const fn result_focused(&self) -> bool {
        self.result_focused
    }

    /// The message pane content shown in place of the grid, if pinned.
    pub fn message_text(&self) -> Option<String> {
        self.view_message.then(|| self.message.text())
    }

    /// The current result table, if any.
    #[inline]
    pub fn result_table(&self) -> Option<&DataTable> {
        self.grid.table()
    }

    /// The grid pane occupies the lower half of the bounds.
    fn grid_bounds(&self) -> Rect {
        let half = self.bounds.height / 2;
        Rect::new(
            self.bounds.left,
            self.bounds.top + half,
            self.bounds.width,
            half,
        )
    }

    /// Re-derive pane bounds from the outer bounds.
    fn layout(&mut self) {
        let grid_bounds = self.grid_bounds();
        self.grid.set_bounds(grid_bounds);
        self.message.set_bounds(grid_bounds);
        // One row above the grid belongs to the divider rule.
        self.editor.set_bounds(Rect::new(
            self.bounds.left,
            self.bounds.top,
            self.bounds.width,
            (self.bounds.height / 2).saturating_sub(1),
        ));
    }

    fn run_query(&mut self, command: String) {
        self.view_message = false;
        match (self.execute_query)(&command) {
            Ok(table) => {
                debug!(rows = table.row_count(), "query returned");
                self.grid.set_table(table);
            }
            Err(e) => {
                self.message.set_text(&e.to_string());
                self.view_message = true;
            }
        }
    }

    fn run_non_query(&mut self, command: String) {
        // The message pane shows the outcome either way.
        self.view_message = true;
        let text = match (self.execute_non_query)(&command) {
            Ok(count) => format!("{count} row(s) affected."),
            Err(e) => e.to_string(),
        };
        self.message.set_text(&text);
    }

    fn execute(&mut self) {
        let text = self.editor.text();
        if text.is_empty() {
            return;
        }
        if text.trim().to_lowercase().starts_with("select") {
            self.run_query(text);
        } else {
            self.run_non_query(text);
        }
    }
}

impl Widget for QueryView {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.layout();
    }

    fn draw(&mut self, screen: &mut ScreenBuffer) -> Result<(), GeometryError> {
        if self.bounds.is_empty() {
            return Ok(());
        }
        self.layout();

        if self.bounds.height >= 2 {
            let divider_y = self.grid_bounds().top - 1;
            screen.set_colors(Color::Gray, Color::Black);
            screen.set_cursor(self.bounds.left, divider_y)?;
            screen.write_repeat(glyph::HORIZONTAL_LINE, usize::from(self.bounds.width));

            if usize::from(self.bounds.width) >= RESULT_LABEL.len() {
                let label_x = self.bounds.left
                    + (self.bounds.width - RESULT_LABEL.len() as u16) / 2;
                screen.set_cursor(label_x, divider_y)?;
                if self.result_focused {
                    screen.set_fg(Color::Yellow);
                }
                screen.write_str(RESULT_LABEL);
            }

            if self.view_message {
                self.message.draw(screen)?;
            } else {
                self.grid.draw(screen)?;
            }
        }

        self.editor.draw(screen)
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Tab => {
                self.result_focused = !self.result_focused;
                true
            }
            KeyCode::F(5) => {
                self.execute();
                true
            }
            _ => {
                if self.result_focused {
                    if self.view_message {
                        self.message.handle_key(event)
                    } else {
                        self.grid.handle_key(event)
                    }
                } else {
                    self.editor.handle_key(event)
                }
            }
        }
    }
}
