//! CDP error types.

use railbook_protocols::DriverError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not running with remote debugging on the endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    /// No Chrome binary could be found.
    #[error("Chrome not found. Install Google Chrome or set browser.chrome_path")]
    ChromeNotFound,

    /// Chrome process could not be started.
    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Session closed.
    #[error("Session closed")]
    SessionClosed,

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(_)
            | CdpError::ChromeNotAvailable(_)
            | CdpError::ChromeNotFound
            | CdpError::LaunchFailed(_) => DriverError::SessionInit(e.to_string()),
            CdpError::SessionClosed => DriverError::Closed,
            other => DriverError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_errors_map_to_session_init() {
        let err: DriverError = CdpError::ChromeNotFound.into();
        assert!(matches!(err, DriverError::SessionInit(_)));

        let err: DriverError = CdpError::LaunchFailed("permission denied".to_string()).into();
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_session_closed_maps_to_closed() {
        let err: DriverError = CdpError::SessionClosed.into();
        assert!(matches!(err, DriverError::Closed));
    }

    #[test]
    fn test_protocol_error_maps_to_other() {
        let err: DriverError = CdpError::Protocol {
            code: -32000,
            message: "No node".to_string(),
        }
        .into();
        assert!(matches!(err, DriverError::Other(ref msg) if msg.contains("No node")));
    }
}
