//! Buffer module: The character/color screen grid and its rendering.
//!
//! This module contains:
//! - [`Cell`]: one glyph plus foreground/background colors
//! - [`Color`]: the fixed 16-color palette (8 base + 8 bright)
//! - [`ScreenBuffer`]: the full-screen grid with cursor-relative writes and
//!   run-length color rendering
//! - [`glyph`]: box-drawing glyph constants

mod cell;
mod screen;

pub use cell::{glyph, Cell, Color};
pub use screen::ScreenBuffer;
