//! Cell: The atomic unit of the screen grid.
//!
//! A cell carries one glyph plus foreground/background colors from the
//! fixed 16-color palette. The null character `'\0'` is a valid glyph that
//! renders as a space but stays distinct internally; widgets use it for
//! intentional blanking so cleared regions can be told apart from regions
//! someone wrote a space into.

/// The fixed 16-color terminal palette: 8 base colors plus 8 bright
/// variants.
///
/// Each color maps to a classic SGR sequence; bright variants use the bold
/// attribute form (`3x;1` / `4x;1`) for the widest terminal compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black.
    Black,
    /// Dark red.
    DarkRed,
    /// Dark green.
    DarkGreen,
    /// Dark yellow (brown on some terminals).
    DarkYellow,
    /// Dark blue.
    DarkBlue,
    /// Dark magenta.
    DarkMagenta,
    /// Dark cyan.
    DarkCyan,
    /// Gray (the base "white").
    Gray,
    /// Dark gray (bright black).
    DarkGray,
    /// Bright red.
    Red,
    /// Bright green.
    Green,
    /// Bright yellow.
    Yellow,
    /// Bright blue.
    Blue,
    /// Bright magenta.
    Magenta,
    /// Bright cyan.
    Cyan,
    /// Bright white.
    White,
}

impl Color {
    /// Default foreground (gray).
    pub const DEFAULT_FG: Self = Self::Gray;
    /// Default background (black).
    pub const DEFAULT_BG: Self = Self::Black;

    /// The SGR sequence selecting this color as the foreground.
    pub const fn fg_seq(self) -> &'static str {
        match self {
            Self::Black => "\x1b[30m",
            Self::DarkRed => "\x1b[31m",
            Self::DarkGreen => "\x1b[32m",
            Self::DarkYellow => "\x1b[33m",
            Self::DarkBlue => "\x1b[34m",
            Self::DarkMagenta => "\x1b[35m",
            Self::DarkCyan => "\x1b[36m",
            Self::Gray => "\x1b[37m",
            Self::DarkGray => "\x1b[30;1m",
            Self::Red => "\x1b[31;1m",
            Self::Green => "\x1b[32;1m",
            Self::Yellow => "\x1b[33;1m",
            Self::Blue => "\x1b[34;1m",
            Self::Magenta => "\x1b[35;1m",
            Self::Cyan => "\x1b[36;1m",
            Self::White => "\x1b[37;1m",
        }
    }

    /// The SGR sequence selecting this color as the background.
    pub const fn bg_seq(self) -> &'static str {
        match self {
            Self::Black => "\x1b[40m",
            Self::DarkRed => "\x1b[41m",
            Self::DarkGreen => "\x1b[42m",
            Self::DarkYellow => "\x1b[43m",
            Self::DarkBlue => "\x1b[44m",
            Self::DarkMagenta => "\x1b[45m",
            Self::DarkCyan => "\x1b[46m",
            Self::Gray => "\x1b[47m",
            Self::DarkGray => "\x1b[40;1m",
            Self::Red => "\x1b[41;1m",
            Self::Green => "\x1b[42;1m",
            Self::Yellow => "\x1b[43;1m",
            Self::Blue => "\x1b[44;1m",
            Self::Magenta => "\x1b[45;1m",
            Self::Cyan => "\x1b[46;1m",
            Self::White => "\x1b[47;1m",
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT_FG
    }
}

/// A single screen cell: one glyph plus its colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The glyph. `'\0'` renders as a space.
    pub ch: char,
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
}

impl Cell {
    /// A blank cell: null glyph with default colors.
    pub const BLANK: Self = Self {
        ch: '\0',
        fg: Color::DEFAULT_FG,
        bg: Color::DEFAULT_BG,
    };

    /// Create a cell with the given glyph and colors.
    #[inline]
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }

    /// The glyph as rendered: `'\0'` substitutes a space.
    #[inline]
    pub const fn glyph(&self) -> char {
        if self.ch == '\0' {
            ' '
        } else {
            self.ch
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({:?} {:?}/{:?})", self.glyph(), self.fg, self.bg)
    }
}

/// Box-drawing glyphs used by [`ScreenBuffer::draw_rect`] and the widgets.
///
/// [`ScreenBuffer::draw_rect`]: super::ScreenBuffer::draw_rect
pub mod glyph {
    /// `┌`
    pub const CORNER_TOP_LEFT: char = '┌';
    /// `╔`
    pub const CORNER_TOP_LEFT_DBL: char = '╔';
    /// `┐`
    pub const CORNER_TOP_RIGHT: char = '┐';
    /// `╗`
    pub const CORNER_TOP_RIGHT_DBL: char = '╗';
    /// `└`
    pub const CORNER_BOTTOM_LEFT: char = '└';
    /// `╚`
    pub const CORNER_BOTTOM_LEFT_DBL: char = '╚';
    /// `┘`
    pub const CORNER_BOTTOM_RIGHT: char = '┘';
    /// `╝`
    pub const CORNER_BOTTOM_RIGHT_DBL: char = '╝';
    /// `│`
    pub const VERTICAL_LINE: char = '│';
    /// `║`
    pub const VERTICAL_LINE_DBL: char = '║';
    /// `─`
    pub const HORIZONTAL_LINE: char = '─';
    /// `═`
    pub const HORIZONTAL_LINE_DBL: char = '═';
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cell_renders_as_space() {
        let cell = Cell::BLANK;
        assert_eq!(cell.ch, '\0');
        assert_eq!(cell.glyph(), ' ');
    }

    #[test]
    fn test_blank_distinct_from_space() {
        let blank = Cell::BLANK;
        let space = Cell::new(' ', Color::DEFAULT_FG, Color::DEFAULT_BG);
        assert_ne!(blank, space);
        assert_eq!(blank.glyph(), space.glyph());
    }

    #[test]
    fn test_color_sequences() {
        assert_eq!(Color::Gray.fg_seq(), "\x1b[37m");
        assert_eq!(Color::Yellow.fg_seq(), "\x1b[33;1m");
        assert_eq!(Color::Black.bg_seq(), "\x1b[40m");
        assert_eq!(Color::White.bg_seq(), "\x1b[47;1m");
    }

    #[test]
    fn test_default_colors() {
        let cell = Cell::default();
        assert_eq!(cell.fg, Color::Gray);
        assert_eq!(cell.bg, Color::Black);
    }
}
