//! Error types for the request portal
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the portal
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Rejected input; the message is shown to the user as-is
    #[snafu(display("{message}"))]
    Invalid { message: String },

    /// IO error (preference file, config file, log directory)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Configuration could not be located or applied
    #[snafu(display("Config error: {message}"))]
    Config { message: String },

    /// Remote data service rejected or failed an operation
    #[snafu(display("{message}"))]
    Remote { collection: String, message: String },

    /// A single-row lookup found nothing
    #[snafu(display("{collection} record {id} not found"))]
    NotFound { collection: String, id: String },

    /// Session/auth service error
    #[snafu(display("{message}"))]
    Auth { message: String },
}

impl Error {
    /// Shorthand for a remote failure on a collection
    pub fn remote(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Remote {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an auth failure
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    /// Shorthand for invalid input
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Invalid {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
