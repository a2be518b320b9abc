//! Layout primitives shared by every widget.

mod point;
mod rect;

pub use point::Point;
pub use rect::Rect;
