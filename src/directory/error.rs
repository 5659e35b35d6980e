//! Failures reported by the role directory.

use thiserror::Error;

use crate::roles::RoleId;

/// Coarse failure taxonomy surfaced to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not complete.
    NetworkFailure,
    /// The role no longer exists server-side.
    NotFound,
}

/// Errors that can occur while talking to the role directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Role {role_id} not found")]
    NotFound { role_id: RoleId },

    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Directory returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed directory response: {0}")]
    Decode(String),

    #[error("Invalid directory URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl DirectoryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DirectoryError::NotFound { .. } => FailureKind::NotFound,
            _ => FailureKind::NetworkFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_kind() {
        let err = DirectoryError::NotFound { role_id: 4 };
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(err.to_string(), "Role 4 not found");
    }

    #[test]
    fn status_errors_are_network_failures() {
        let err = DirectoryError::Status {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.kind(), FailureKind::NetworkFailure);
    }
}
