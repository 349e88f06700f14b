//! Error types and handling for parse-address.

/// Result type alias for parse-address operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for parse-address operations.
///
/// Only the input guard produces the first four variants, always before any
/// decomposition starts. Messages are fixed per kind so nothing about the
/// rejected input leaks into them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input was empty
    #[error("input is empty")]
    InputEmpty,

    /// The input exceeded the configured byte cap
    #[error("input exceeds maximum allowed length")]
    InputTooLong {
        /// Length of the rejected input in bytes
        len: usize,
        /// Configured maximum in bytes
        max: usize,
    },

    /// The input was not valid UTF-8
    #[error("input is not valid UTF-8")]
    InvalidEncoding,

    /// The input contained an embedded NUL byte
    #[error("input contains invalid characters")]
    InvalidCharacters,

    /// Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The kind of this error, without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InputEmpty => ErrorKind::InputEmpty,
            Error::InputTooLong { .. } => ErrorKind::InputTooLong,
            Error::InvalidEncoding => ErrorKind::InvalidEncoding,
            Error::InvalidCharacters => ErrorKind::InvalidCharacters,
            Error::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }
}

/// Payload-free discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InputEmpty`]
    InputEmpty,
    /// See [`Error::InputTooLong`]
    InputTooLong,
    /// See [`Error::InvalidEncoding`]
    InvalidEncoding,
    /// See [`Error::InvalidCharacters`]
    InvalidCharacters,
    /// See [`Error::InvalidConfig`]
    InvalidConfig,
}

impl ErrorKind {
    /// Stable snake_case code for transports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputEmpty => "input_empty",
            ErrorKind::InputTooLong => "input_too_long",
            ErrorKind::InvalidEncoding => "invalid_encoding",
            ErrorKind::InvalidCharacters => "invalid_characters",
            ErrorKind::InvalidConfig => "invalid_config",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_leak_lengths() {
        let err = Error::InputTooLong { len: 10_001, max: 10_000 };
        let message = err.to_string();
        assert_eq!(message, "input exceeds maximum allowed length");
        assert!(!message.contains("10001"));
        assert!(!message.contains("10000"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::InputEmpty.kind(), ErrorKind::InputEmpty);
        assert_eq!(Error::invalid_config("bad").kind(), ErrorKind::InvalidConfig);
        assert_eq!(ErrorKind::InvalidCharacters.as_str(), "invalid_characters");
        assert_eq!(ErrorKind::InputTooLong.to_string(), "input_too_long");
    }
}
