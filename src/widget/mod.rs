//! Widgets: keyboard-driven views over the shared screen buffer.
//!
//! Every widget implements [`Widget`]: it owns its bounds and all
//! selection/cursor/viewport state, reacts to key events, and renders into
//! the buffer it is handed. Widgets never own the buffer or the terminal.

mod editor;
mod grid;
mod list;
mod query;
mod traits;

pub use editor::TextEditor;
pub use grid::GridView;
pub use list::ListView;
pub use query::{ExecFn, QueryFn, QueryView};
pub use traits::Widget;
