//! Ready-made color fragments.
//!
//! `fore` and `back` hold one constructor per palette color, returning an
//! empty leaf that switches the foreground or background respectively.
//! Every call builds a fresh fragment, so appending text to one preset never
//! affects another.
//!
//! ```
//! use tinted::presets::{back, fore, reset_all};
//! use tinted::RenderConfig;
//!
//! let config = RenderConfig::default();
//! let warning = fore::yellow() + "warning:" + reset_all(&config) + " disk full";
//! assert_eq!(warning.flatten(), "warning: disk full");
//! # let _ = back::red();
//! ```

use crate::{Fragment, RenderConfig};

macro_rules! palette {
    ($side:literal, $ctor:path) => {
        palette!(@each $side, $ctor,
            black => Black,
            dark_blue => DarkBlue,
            dark_green => DarkGreen,
            dark_cyan => DarkCyan,
            dark_red => DarkRed,
            dark_magenta => DarkMagenta,
            dark_yellow => DarkYellow,
            gray => Gray,
            dark_gray => DarkGray,
            blue => Blue,
            green => Green,
            cyan => Cyan,
            red => Red,
            magenta => Magenta,
            yellow => Yellow,
            white => White,
        );
    };
    (@each $side:literal, $ctor:path, $($name:ident => $color:ident,)+) => {
        $(
            #[doc = concat!(
                "An empty leaf with a ", stringify!($name), " ", $side, "."
            )]
            pub fn $name() -> Fragment {
                $ctor(Color::$color)
            }
        )+
    };
}

/// Foreground presets.
pub mod fore {
    use super::*;
    use crate::Color;

    palette!("foreground", of);

    /// An empty leaf with the given foreground.
    pub fn of(color: Color) -> Fragment {
        Fragment::from_fore(color)
    }

    /// An empty leaf with the configured default foreground.
    pub fn reset(config: &RenderConfig) -> Fragment {
        Fragment::from_fore(config.default_fore())
    }
}

/// Background presets.
pub mod back {
    use super::*;
    use crate::Color;

    palette!("background", of);

    /// An empty leaf with the given background.
    pub fn of(color: Color) -> Fragment {
        Fragment::from_back(color)
    }

    /// An empty leaf with the configured default background.
    pub fn reset(config: &RenderConfig) -> Fragment {
        Fragment::from_back(config.default_back())
    }
}

/// An empty leaf with both configured default colors.
pub fn reset_all(config: &RenderConfig) -> Fragment {
    Fragment::reset_all(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn fore_presets_set_only_foreground() {
        let presets = [
            fore::black(),
            fore::dark_blue(),
            fore::dark_green(),
            fore::dark_cyan(),
            fore::dark_red(),
            fore::dark_magenta(),
            fore::dark_yellow(),
            fore::gray(),
            fore::dark_gray(),
            fore::blue(),
            fore::green(),
            fore::cyan(),
            fore::red(),
            fore::magenta(),
            fore::yellow(),
            fore::white(),
        ];
        for (preset, color) in presets.iter().zip(Color::ALL) {
            assert_eq!(preset.fore(), Some(color));
            assert_eq!(preset.back(), None);
            assert_eq!(preset.text(), "");
        }
    }

    #[test]
    fn back_presets_set_only_background() {
        let presets = [
            back::black(),
            back::dark_blue(),
            back::dark_green(),
            back::dark_cyan(),
            back::dark_red(),
            back::dark_magenta(),
            back::dark_yellow(),
            back::gray(),
            back::dark_gray(),
            back::blue(),
            back::green(),
            back::cyan(),
            back::red(),
            back::magenta(),
            back::yellow(),
            back::white(),
        ];
        for (preset, color) in presets.iter().zip(Color::ALL) {
            assert_eq!(preset.back(), Some(color));
            assert_eq!(preset.fore(), None);
        }
    }

    #[test]
    fn resets_follow_config() {
        let mut config = RenderConfig::default();
        assert_eq!(fore::reset(&config).fore(), Some(Color::White));
        assert_eq!(back::reset(&config).back(), Some(Color::Black));

        config.set_default_fore(Color::Gray);
        assert_eq!(fore::reset(&config).fore(), Some(Color::Gray));
        let all = reset_all(&config);
        assert_eq!((all.fore(), all.back()), (Some(Color::Gray), Some(Color::Black)));
    }

    #[test]
    fn presets_are_fresh_each_call() {
        let a = fore::red() + "a";
        let b = fore::red();
        assert!(!a.ptr_eq(&b));
        assert_eq!(b.text(), "");
    }
}
