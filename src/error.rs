//! Errors from loading a render configuration.

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

/// An error from loading a `RenderConfig`.
///
/// Rendering itself reports sink failures as plain `io::Error`s; this type
/// only covers turning user supplied settings into a configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The TOML document could not be parsed into a configuration.
    #[error("invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// An environment variable holds a value that doesn't parse.
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_env_display() {
        let err = Error::InvalidEnv {
            var: "TINTED_AUTO_RESET",
            value: "maybe".to_string(),
            reason: "expected a boolean".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'maybe' for TINTED_AUTO_RESET: expected a boolean"
        );
    }

    #[test]
    fn toml_error_converts() {
        let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let err: Error = toml_err.into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("invalid render configuration"));
    }
}
