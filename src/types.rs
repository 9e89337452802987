use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// ColorChoice represents the color preferences of an end user.
///
/// The `Default` implementation for this type will select `Auto`, which tries
/// to do the right thing based on the current environment.
///
/// The `FromStr` implementation for this type converts a lowercase kebab-case
/// string of the variant name to the corresponding variant. Any other string
/// results in an error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorChoice {
    /// Always emit ANSI color codes.
    Always,
    /// Emit colors unless `NO_COLOR` is defined or `TERM=dumb`.
    #[default]
    Auto,
    /// Never emit colors.
    Never,
}

impl FromStr for ColorChoice {
    type Err = ColorChoiceParseError;

    fn from_str(s: &str) -> Result<ColorChoice, ColorChoiceParseError> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            "auto" => Ok(ColorChoice::Auto),
            unknown => Err(ColorChoiceParseError {
                unknown_choice: unknown.to_string(),
            }),
        }
    }
}

impl ColorChoice {
    /// Returns true if we should attempt to write colored output.
    pub(crate) fn should_attempt_color(&self) -> bool {
        match *self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.env_allows_color(),
        }
    }

    #[cfg(not(windows))]
    fn env_allows_color(&self) -> bool {
        match env::var_os("TERM") {
            // If TERM isn't set, then we are in a weird environment that
            // probably doesn't support colors.
            None => return false,
            Some(k) => {
                if k == "dumb" {
                    return false;
                }
            }
        }
        env::var_os("NO_COLOR").is_none()
    }

    #[cfg(windows)]
    fn env_allows_color(&self) -> bool {
        // Unlike on Unix, a missing TERM on Windows says nothing about
        // whether the console can show colors.
        if let Some(k) = env::var_os("TERM") {
            if k == "dumb" {
                return false;
            }
        }
        env::var_os("NO_COLOR").is_none()
    }
}

/// An error that occurs when parsing a `ColorChoice` fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error(
    "unrecognized color choice '{unknown_choice}': valid choices are: \
     always, never, auto"
)]
pub struct ColorChoiceParseError {
    unknown_choice: String,
}

impl ColorChoiceParseError {
    /// Return the string that couldn't be parsed as a valid color choice.
    pub fn invalid_choice(&self) -> &str {
        &self.unknown_choice
    }
}

/// The 16 colors of the classic console palette.
///
/// The first eight are the "dark" (normal intensity) colors and the last
/// eight their bright counterparts. `Gray` is the normal-intensity white and
/// `DarkGray` the bright black, which is how consoles have always named them.
///
/// This type has a `FromStr` impl that matches the kebab-case names printed
/// by its `Display` impl (`dark-blue`, `gray`, ...) case insensitively. The
/// separator may also be `_` or left out entirely.
#[allow(missing_docs)]
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl Color {
    /// Every palette color, in palette order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// The kebab-case name of this color.
    pub fn name(&self) -> &'static str {
        match *self {
            Color::Black => "black",
            Color::DarkBlue => "dark-blue",
            Color::DarkGreen => "dark-green",
            Color::DarkCyan => "dark-cyan",
            Color::DarkRed => "dark-red",
            Color::DarkMagenta => "dark-magenta",
            Color::DarkYellow => "dark-yellow",
            Color::Gray => "gray",
            Color::DarkGray => "dark-gray",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Red => "red",
            Color::Magenta => "magenta",
            Color::Yellow => "yellow",
            Color::White => "white",
        }
    }

    /// Returns true for the eight bright colors.
    pub fn is_bright(&self) -> bool {
        matches!(
            *self,
            Color::DarkGray
                | Color::Blue
                | Color::Green
                | Color::Cyan
                | Color::Red
                | Color::Magenta
                | Color::Yellow
                | Color::White
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|&c| c != '-' && c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.name().replace('-', "") == normalized)
            .ok_or_else(|| ParseColorError { given: s.to_string() })
    }
}

/// An error from parsing an invalid color name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error(
    "unrecognized color name '{given}'. Choose from: black, dark-blue, \
     dark-green, dark-cyan, dark-red, dark-magenta, dark-yellow, gray, \
     dark-gray, blue, green, cyan, red, magenta, yellow, white"
)]
pub struct ParseColorError {
    given: String,
}

impl ParseColorError {
    /// Return the string that couldn't be parsed as a valid color.
    pub fn invalid(&self) -> &str {
        &self.given
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_round_trip_through_from_str() {
        for color in Color::ALL {
            assert_eq!(color.name().parse::<Color>(), Ok(color));
        }
    }

    #[test]
    fn color_from_str_accepts_separator_variants() {
        assert_eq!("DarkBlue".parse::<Color>(), Ok(Color::DarkBlue));
        assert_eq!("dark_blue".parse::<Color>(), Ok(Color::DarkBlue));
        assert_eq!(" DARK-BLUE ".parse::<Color>(), Ok(Color::DarkBlue));
        assert_eq!("darkgray".parse::<Color>(), Ok(Color::DarkGray));
    }

    #[test]
    fn color_from_str_rejects_unknown_names() {
        let err = "purple".parse::<Color>().unwrap_err();
        assert_eq!(err.invalid(), "purple");
        assert!(err.to_string().contains("unrecognized color name 'purple'"));
        assert!("".parse::<Color>().is_err());
        assert!("dark".parse::<Color>().is_err());
    }

    #[test]
    fn bright_colors_are_the_second_half_of_the_palette() {
        let (dark, bright) = Color::ALL.split_at(8);
        assert!(dark.iter().all(|c| !c.is_bright()));
        assert!(bright.iter().all(|c| c.is_bright()));
    }

    #[test]
    fn color_choice_from_str() {
        assert_eq!("always".parse::<ColorChoice>(), Ok(ColorChoice::Always));
        assert_eq!("NEVER".parse::<ColorChoice>(), Ok(ColorChoice::Never));
        assert_eq!("auto".parse::<ColorChoice>(), Ok(ColorChoice::Auto));
        let err = "sometimes".parse::<ColorChoice>().unwrap_err();
        assert_eq!(err.invalid_choice(), "sometimes");
    }

    #[test]
    fn color_choice_never_and_always_ignore_environment() {
        assert!(ColorChoice::Always.should_attempt_color());
        assert!(!ColorChoice::Never.should_attempt_color());
    }
}
