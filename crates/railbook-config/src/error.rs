//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Configuration has {} error(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ConfigError::NotFound("railbook.toml".to_string());
        assert!(err.to_string().contains("railbook.toml"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::InvalidValue {
            field: "site.locators.search_button".to_string(),
            message: "empty locator".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("search_button"));
        assert!(display.contains("empty locator"));
    }

    #[test]
    fn test_env_var_not_set_error() {
        let err = ConfigError::EnvVarNotSet("IRCTC_PASSWORD".to_string());
        assert!(err.to_string().contains("IRCTC_PASSWORD"));
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    fn test_invalid_lists_every_message() {
        let err = ConfigError::Invalid(vec![
            "journey.origin: required".to_string(),
            "payment.cvv: required".to_string(),
        ]);
        let display = err.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("journey.origin"));
        assert!(display.contains("payment.cvv"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().contains("file not found"));
    }
}
