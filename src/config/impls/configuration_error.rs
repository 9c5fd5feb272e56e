use std::fmt;
use std::fmt::Formatter;
use crate::config::enums::configuration_error::ConfigurationError;

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConfigurationError::IOError(error) => write!(f, "IO error: {error}"),
            ConfigurationError::ParseError(error) => write!(f, "config parse error: {error}"),
            ConfigurationError::SerializeError(error) => write!(f, "config serialize error: {error}"),
            ConfigurationError::InvalidValue(message) => write!(f, "invalid config value: {message}"),
        }
    }
}

impl std::error::Error for ConfigurationError {}
