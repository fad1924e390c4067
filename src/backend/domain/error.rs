//! Error types for backend domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing backend domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendDomainError {
    /// The backend name is empty after trimming.
    #[error("backend name must not be empty")]
    EmptyName,

    /// The backend description is empty after trimming.
    #[error("backend description must not be empty")]
    EmptyDescription,

    /// The API endpoint is empty after trimming.
    #[error("API endpoint must not be empty")]
    EmptyEndpoint,

    /// The API endpoint does not have an `http://` or `https://` prefix.
    #[error("API endpoint '{0}' must start with 'http://' or 'https://'")]
    InvalidEndpoint(String),

    /// The API credential is empty after trimming.
    #[error("API credential must not be empty")]
    EmptyCredential,

    /// The script path is empty after trimming.
    #[error("script path must not be empty")]
    EmptyScriptPath,

    /// The command line is empty after trimming.
    #[error("command line must not be empty")]
    EmptyCommandLine,

    /// A custom backend declares neither a script path nor a command line.
    #[error("custom backend requires a script path or a command line")]
    MissingCustomTarget,
}

/// Error returned while parsing a backend type label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown backend type: {0}")]
pub struct ParseBackendTypeError(pub String);
