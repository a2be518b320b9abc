//! Error types for the toolkit.
//!
//! Two kinds of failure matter at this layer:
//!
//! - [`GeometryError`]: cursor or rectangle coordinates outside the screen
//!   buffer. These are contract violations by the caller and are surfaced as
//!   `Result`s so they fail fast instead of being silently clamped. The one
//!   deliberate clamp is write wrapping at the end of the last row, which is
//!   not an error.
//! - [`DataError`]: a failure reported by the host's query or statement
//!   execution function. These are recovered locally by the query view and
//!   shown as a one-line message; they never crash the process.

use crate::layout::Rect;
use thiserror::Error;

/// A coordinate or rectangle fell outside the screen buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Cursor position outside `[0, width) x [0, height)`.
    #[error("cursor position ({x}, {y}) outside buffer {width}x{height}")]
    CursorOutOfBounds {
        /// Requested column.
        x: u16,
        /// Requested row.
        y: u16,
        /// Buffer width.
        width: u16,
        /// Buffer height.
        height: u16,
    },

    /// Rectangle extends past the buffer edge.
    #[error("rectangle {rect:?} exceeds buffer {width}x{height}")]
    RectOutOfBounds {
        /// The offending rectangle.
        rect: Rect,
        /// Buffer width.
        width: u16,
        /// Buffer height.
        height: u16,
    },
}

/// A failure reported by an external query or statement-execution function.
///
/// Carries only a display message; the toolkit does not interpret it beyond
/// showing it in the query view's message pane.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DataError(pub String);

impl DataError {
    /// Create a data error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for DataError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for DataError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
