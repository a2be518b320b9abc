//! The widget capability shared by every interactive view.

use crate::actor::KeyEvent;
use crate::buffer::ScreenBuffer;
use crate::error::GeometryError;
use crate::layout::Rect;

/// A keyboard-driven view that renders into a bounded region of the shared
/// screen buffer.
///
/// This is the whole polymorphic surface the shell needs: it holds one
/// `Box<dyn Widget>` as "the active view" and forwards input and resize
/// events uniformly. Widgets own their selection/viewport state exclusively
/// and never own the buffer; `draw` receives it.
pub trait Widget {
    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect;

    /// Replace the bounds wholesale (e.g., on terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Handle one key event.
    ///
    /// Returns `true` if the event was consumed and mutated widget state;
    /// the caller must then redraw this widget's bounded region.
    fn handle_key(&mut self, event: &KeyEvent) -> bool;

    /// Render this widget into its bounds on the given buffer.
    ///
    /// # Errors
    ///
    /// Fails fast on geometry contract violations (bounds outside the
    /// buffer); never fails on degenerate (empty) bounds.
    fn draw(&mut self, screen: &mut ScreenBuffer) -> Result<(), GeometryError>;
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        (**self).set_bounds(bounds);
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        (**self).handle_key(event)
    }

    fn draw(&mut self, screen: &mut ScreenBuffer) -> Result<(), GeometryError> {
        (**self).draw(screen)
    }
}
