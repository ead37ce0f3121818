//! Custom error types for the ki-admin customizer
//!
//! This module defines the error type shared by the preference store, the
//! applier and the web server. Most of these errors never reach a caller:
//! the store and the applier log them and fall back to defaults.

use std::fmt;

/// Main error type for the ki-admin application
#[derive(Debug)]
pub enum CustomizerError {
    /// Error occurred while parsing address
    AddressParse(std::net::AddrParseError),

    /// Error occurred while running the server
    ServerRun(std::io::Error),

    /// Error occurred while reading configuration file
    ConfigRead(std::io::Error),

    /// Error occurred while parsing configuration
    ConfigParse(json5::Error),

    /// The durable key-value storage could not be read or written
    StorageUnavailable(String),

    /// A write would exceed the configured storage quota
    StorageFull {
        /// Size in bytes the storage would have after the write
        required: usize,
        /// Configured quota in bytes
        quota: usize,
    },

    /// A value outside the enumerated domain of a preference
    InvalidPreferenceValue {
        /// Preference name as given by the caller
        name: String,
        /// Rejected value
        value: String,
    },

    /// Generic error with a message
    Generic(String),
}

impl fmt::Display for CustomizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomizerError::AddressParse(e) => {
                write!(f, "Failed to parse network address: {e}")
            }
            CustomizerError::ServerRun(e) => {
                write!(f, "Server runtime error: {e}")
            }
            CustomizerError::ConfigRead(e) => {
                write!(f, "Failed to read configuration file: {e}")
            }
            CustomizerError::ConfigParse(e) => {
                write!(f, "Failed to parse configuration: {e}")
            }
            CustomizerError::StorageUnavailable(msg) => {
                write!(f, "Preference storage unavailable: {msg}")
            }
            CustomizerError::StorageFull { required, quota } => {
                write!(
                    f,
                    "Preference storage quota exceeded: {required} bytes needed, {quota} allowed"
                )
            }
            CustomizerError::InvalidPreferenceValue { name, value } => {
                write!(f, "Invalid value '{value}' for preference '{name}'")
            }
            CustomizerError::Generic(msg) => {
                write!(f, "Error: {msg}")
            }
        }
    }
}

impl std::error::Error for CustomizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CustomizerError::AddressParse(e) => Some(e),
            CustomizerError::ServerRun(e) | CustomizerError::ConfigRead(e) => Some(e),
            CustomizerError::ConfigParse(e) => Some(e),
            CustomizerError::StorageUnavailable(_)
            | CustomizerError::StorageFull { .. }
            | CustomizerError::InvalidPreferenceValue { .. }
            | CustomizerError::Generic(_) => None,
        }
    }
}

impl From<std::net::AddrParseError> for CustomizerError {
    fn from(error: std::net::AddrParseError) -> Self {
        CustomizerError::AddressParse(error)
    }
}

impl From<std::io::Error> for CustomizerError {
    fn from(error: std::io::Error) -> Self {
        CustomizerError::ConfigRead(error)
    }
}

impl From<json5::Error> for CustomizerError {
    fn from(error: json5::Error) -> Self {
        CustomizerError::ConfigParse(error)
    }
}

impl From<serde_json::Error> for CustomizerError {
    fn from(error: serde_json::Error) -> Self {
        CustomizerError::Generic(format!("JSON error: {error}"))
    }
}

impl From<&str> for CustomizerError {
    fn from(msg: &str) -> Self {
        CustomizerError::Generic(msg.to_string())
    }
}

impl From<String> for CustomizerError {
    fn from(msg: String) -> Self {
        CustomizerError::Generic(msg)
    }
}

/// Result type alias using our custom error type
pub type Result<T> = std::result::Result<T, CustomizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = CustomizerError::InvalidPreferenceValue {
            name: "text-option".to_string(),
            value: "huge-text".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'huge-text' for preference 'text-option'"
        );
    }

    #[test]
    fn test_from_str_is_generic() {
        let err = CustomizerError::from("boom");
        assert_eq!(err.to_string(), "Error: boom");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = CustomizerError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
