//! Render configuration.
//!
//! Everything that used to be process-wide state in console coloring
//! libraries (whether to reset after a render, what "default" colors mean)
//! lives in a `RenderConfig` that the caller owns and passes to the render
//! calls. Build it once at startup and read it while rendering.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{Color, ColorChoice, StandardStream};

const ENV_AUTO_RESET: &str = "TINTED_AUTO_RESET";
const ENV_DEFAULT_FORE: &str = "TINTED_DEFAULT_FORE";
const ENV_DEFAULT_BACK: &str = "TINTED_DEFAULT_BACK";
const ENV_COLOR: &str = "TINTED_COLOR";

/// Settings consulted when fragments are rendered.
///
/// The `Default` implementation resets after every render, treats white on
/// black as the terminal defaults and picks `ColorChoice::Auto`.
///
/// This type deserializes from kebab-case keys; missing keys keep their
/// default values:
///
/// ```toml
/// auto-reset = false
/// default-fore = "gray"
/// default-back = "black"
/// color-choice = "always"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    pub(crate) auto_reset: bool,
    pub(crate) default_fore: Color,
    pub(crate) default_back: Color,
    pub(crate) color_choice: ColorChoice,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            auto_reset: true,
            default_fore: Color::White,
            default_back: Color::Black,
            color_choice: ColorChoice::Auto,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> RenderConfig {
        RenderConfig::default()
    }

    /// Whether the sink is reset after each render call.
    pub fn auto_reset(&self) -> bool {
        self.auto_reset
    }

    /// Set whether the sink is reset after each render call.
    pub fn set_auto_reset(&mut self, yes: bool) -> &mut RenderConfig {
        self.auto_reset = yes;
        self
    }

    /// The color `reset` presets use for the foreground.
    pub fn default_fore(&self) -> Color {
        self.default_fore
    }

    /// Set the color `reset` presets use for the foreground.
    pub fn set_default_fore(&mut self, color: Color) -> &mut RenderConfig {
        self.default_fore = color;
        self
    }

    /// The color `reset` presets use for the background.
    pub fn default_back(&self) -> Color {
        self.default_back
    }

    /// Set the color `reset` presets use for the background.
    pub fn set_default_back(&mut self, color: Color) -> &mut RenderConfig {
        self.default_back = color;
        self
    }

    /// The color preference used when opening standard streams.
    pub fn color_choice(&self) -> ColorChoice {
        self.color_choice
    }

    /// Set the color preference used when opening standard streams.
    pub fn set_color_choice(
        &mut self,
        choice: ColorChoice,
    ) -> &mut RenderConfig {
        self.color_choice = choice;
        self
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<RenderConfig> {
        let config: RenderConfig = toml::from_str(s)?;
        tracing::debug!(?config, "loaded render configuration from toml");
        Ok(config)
    }

    /// Build a configuration from the defaults and the process environment.
    ///
    /// See `apply_env_with` for the variables consulted.
    pub fn from_env() -> Result<RenderConfig> {
        let mut config = RenderConfig::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override settings from the process environment.
    pub fn apply_env(&mut self) -> Result<&mut RenderConfig> {
        self.apply_env_with(|var| env::var(var).ok())
    }

    /// Override settings from variables looked up through `lookup`.
    ///
    /// The variables are `TINTED_AUTO_RESET` (`true`/`false`/`1`/`0`),
    /// `TINTED_DEFAULT_FORE` and `TINTED_DEFAULT_BACK` (color names) and
    /// `TINTED_COLOR` (`always`/`auto`/`never`). Unset variables leave the
    /// corresponding setting alone. Nothing is changed if any variable is
    /// invalid.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<&mut RenderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.clone();
        if let Some(value) = lookup(ENV_AUTO_RESET) {
            next.auto_reset = parse_bool(&value).ok_or_else(|| {
                Error::InvalidEnv {
                    var: ENV_AUTO_RESET,
                    value: value.clone(),
                    reason: "expected true, false, 1 or 0".to_string(),
                }
            })?;
        }
        if let Some(value) = lookup(ENV_DEFAULT_FORE) {
            next.default_fore = parse_env(ENV_DEFAULT_FORE, value)?;
        }
        if let Some(value) = lookup(ENV_DEFAULT_BACK) {
            next.default_back = parse_env(ENV_DEFAULT_BACK, value)?;
        }
        if let Some(value) = lookup(ENV_COLOR) {
            next.color_choice = parse_env(ENV_COLOR, value)?;
        }
        if next != *self {
            tracing::debug!(config = ?next, "applied environment overrides");
        }
        *self = next;
        Ok(self)
    }

    /// Open standard output honoring the configured color choice.
    pub fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.color_choice)
    }

    /// Open standard error honoring the configured color choice.
    pub fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.color_choice)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_env<T>(var: &'static str, value: String) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(Error::InvalidEnv { var, reason: e.to_string(), value }),
    }
}
