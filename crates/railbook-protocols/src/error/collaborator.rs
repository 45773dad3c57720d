//! Artifact and notification collaborator errors.

use thiserror::Error;

use super::DriverError;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Ticket record is incomplete: {0}")]
    InvalidRecord(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("Notification context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Dispatch failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ArtifactError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_notification_error_is_transparent_over_driver() {
        let err: NotificationError = DriverError::Closed.into();
        assert_eq!(err.to_string(), "Session closed");
    }
}
