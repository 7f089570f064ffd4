// SPDX-License-Identifier: LGPL-3.0-only
use thiserror::Error;

/// Errors reported by a host capability.
///
/// Hosts reject with a human-readable message; [HostError::Rejected] carries
/// it unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Path does not exist.
    #[error("Path does not exist: {0}")]
    NotFound(String),

    /// Path exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    /// Target already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A known folder could not be resolved.
    #[error("Known folder is not available: {0}")]
    UnknownFolder(String),

    /// The host does not offer this capability.
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// The host refused the request.
    #[error("{0}")]
    Rejected(String),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err.to_string())
    }
}
