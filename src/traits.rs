use crate::Color;
use std::io;

/// This trait describes the behavior of writers that fragments render to.
///
/// Text is written through the `io::Write` supertrait. The color methods
/// change the color used for text written afterwards, so a renderer only
/// needs to call them when a fragment actually carries a color.
pub trait WriteColor: io::Write {
    /// Returns true if and only if the underlying writer supports colors.
    fn supports_color(&self) -> bool;

    /// Set the foreground color of the writer.
    ///
    /// Subsequent writes use this foreground until either `reset` is called
    /// or another foreground is set. The background is left untouched.
    fn set_fg(&mut self, color: Color) -> io::Result<()>;

    /// Set the background color of the writer.
    ///
    /// Subsequent writes use this background until either `reset` is called
    /// or another background is set. The foreground is left untouched.
    fn set_bg(&mut self, color: Color) -> io::Result<()>;

    /// Reset both colors to the writer's own defaults.
    ///
    /// If there was a problem resetting the color settings, then an error is
    /// returned.
    fn reset(&mut self) -> io::Result<()>;
}

impl<T: ?Sized + WriteColor> WriteColor for &mut T {
    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_fg(color)
    }
    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_bg(color)
    }
    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}

impl<T: ?Sized + WriteColor> WriteColor for Box<T> {
    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_fg(color)
    }
    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_bg(color)
    }
    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}
