//! # Termgrid
//!
//! A cell-buffer terminal UI toolkit for data-browsing tools.
//!
//! Termgrid renders whole screens from an in-memory grid of colored cells
//! and ships the widgets a query/table browser needs: a result grid, a
//! column-major item list, a plain-text editor, and a split query view that
//! composes them.
//!
//! ## Core Concepts
//!
//! - **One buffer, one syscall**: widgets paint into a shared [`ScreenBuffer`];
//!   rendering serializes the whole grid into a single write, emitting a
//!   color escape only where colors change
//! - **Cursor-relative writes**: text wraps at the right edge and clamps
//!   silently past the last row, so full-width fills never error
//! - **Actor model**: dedicated threads for input polling and terminal-size
//!   watching, serialized against the main loop by one workspace mutex
//! - **Widgets own their state**: bounds, selection, and viewport live in
//!   the widget; the buffer is handed in at draw time
//!
//! ## Example
//!
//! ```rust,ignore
//! use termgrid::{Rect, ScreenBuffer, TextEditor, Widget};
//!
//! let mut screen = ScreenBuffer::new(80, 24);
//! let mut editor = TextEditor::new(Rect::new(0, 0, 80, 24));
//! editor.set_text("SELECT 1;");
//! editor.draw(&mut screen)?;
//! screen.render()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod actor;
pub mod buffer;
pub mod data;
pub mod error;
pub mod layout;
pub mod shell;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
pub use buffer::{Cell, Color, ScreenBuffer};
pub use data::{Column, DataTable, Value};
pub use error::{DataError, GeometryError};
pub use layout::{Point, Rect};
pub use shell::{MenuItem, Shell, ShellConfig, Workspace};
pub use widget::{GridView, ListView, QueryView, TextEditor, Widget};
