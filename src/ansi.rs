//! ANSI escape sequence functionality for terminal color output.
//!
//! This module provides the low-level mapping from the 16-color palette to
//! SGR escape sequences. Callers should prefer the `Ansi` writer, which uses
//! these functions to implement `WriteColor`.

use crate::Color;
use std::fmt;
use std::io;

/// The escape sequence that resets all colors to the terminal defaults.
pub const RESET: &str = "\x1B[0m";

/// Returns the SGR parameter for the given color.
///
/// Normal intensity colors use 30-37 (foreground) and 40-47 (background),
/// bright colors use 90-97 and 100-107.
pub fn sgr_code(color: Color, bg: bool) -> u8 {
    let offset = match color {
        Color::Black | Color::DarkGray => 0,
        Color::DarkRed | Color::Red => 1,
        Color::DarkGreen | Color::Green => 2,
        Color::DarkYellow | Color::Yellow => 3,
        Color::DarkBlue | Color::Blue => 4,
        Color::DarkMagenta | Color::Magenta => 5,
        Color::DarkCyan | Color::Cyan => 6,
        Color::Gray | Color::White => 7,
    };
    let base = match (color.is_bright(), bg) {
        (false, false) => 30,
        (false, true) => 40,
        (true, false) => 90,
        (true, true) => 100,
    };
    base + offset
}

/// Writes an ANSI escape sequence corresponding to the given color.
///
/// If `bg` is true, then the color is treated as a background color.
/// Otherwise, it's treated as a foreground color.
pub fn ansi_color<W: io::Write>(
    mut wtr: W,
    color: Color,
    bg: bool,
) -> io::Result<()> {
    write!(wtr, "\x1B[{}m", sgr_code(color, bg))
}

/// A convenience function for creating a color pair that can be formatted
/// to an ANSI color string.
pub fn ansi_color_only(fg: Option<Color>, bg: Option<Color>) -> AnsiColor {
    AnsiColor { fg, bg }
}

/// A color pair that can be formatted to an ANSI color string.
///
/// This is created by the `ansi_color_only` function. Unset colors produce
/// no output, so an `AnsiColor` with neither color formats as "".
pub struct AnsiColor {
    fg: Option<Color>,
    bg: Option<Color>,
}

impl fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.fg {
            write!(f, "\x1B[{}m", sgr_code(c, false))?;
        }
        if let Some(c) = self.bg {
            write!(f, "\x1B[{}m", sgr_code(c, true))?;
        }
        Ok(())
    }
}
