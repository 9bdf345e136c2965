//! Error types for Tinder

use thiserror::Error;

/// The main error type for Tinder operations
#[derive(Debug, Error)]
pub enum TinderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for Tinder operations
pub type Result<T> = std::result::Result<T, TinderError>;

impl From<toml::de::Error> for TinderError {
    fn from(err: toml::de::Error) -> Self {
        TinderError::TomlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_errors_convert() {
        let err: TinderError = toml::from_str::<toml::Table>("key = ")
            .map_err(TinderError::from)
            .unwrap_err();
        assert!(matches!(err, TinderError::TomlParse(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = TinderError::from(io);
        assert_eq!(err.to_string(), "IO error: missing");
    }
}
