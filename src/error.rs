// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    Diagnostics(String),
    InvalidNotification(InvalidNotificationError),
}

/// Rejection reasons for [`Manager::add`](crate::notifications::Manager::add).
///
/// This is the only input a caller can get wrong; every other queue
/// operation is total over its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidNotificationError {
    /// The message was empty or contained only whitespace.
    EmptyMessage,
}

impl InvalidNotificationError {
    /// Returns a stable key identifying this rejection, suitable for i18n lookup.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            InvalidNotificationError::EmptyMessage => "notification-invalid-empty-message",
        }
    }
}

impl fmt::Display for InvalidNotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidNotificationError::EmptyMessage => {
                write!(f, "Notification message must not be empty")
            }
        }
    }
}

impl std::error::Error for InvalidNotificationError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Diagnostics(e) => write!(f, "Diagnostics Error: {}", e),
            Error::InvalidNotification(e) => write!(f, "Invalid Notification: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidNotification(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidNotificationError> for Error {
    fn from(err: InvalidNotificationError) -> Self {
        Error::InvalidNotification(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Diagnostics(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
