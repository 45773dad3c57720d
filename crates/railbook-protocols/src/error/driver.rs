//! Interaction-driver errors.

use thiserror::Error;

use crate::driver::{Locator, ReadyState};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Session init failed: {0}")]
    SessionInit(String),

    #[error("Navigation to {url} (waiting for {ready}) failed: {reason}")]
    Navigation {
        url: String,
        ready: ReadyState,
        reason: String,
    },

    #[error("Interaction with {locator} failed: {reason}")]
    Interaction { locator: String, reason: String },

    #[error("Session closed")]
    Closed,

    #[error("Driver error: {0}")]
    Other(String),
}

impl DriverError {
    pub fn interaction(locator: &Locator, reason: impl Into<String>) -> Self {
        DriverError::Interaction {
            locator: locator.to_string(),
            reason: reason.into(),
        }
    }

    pub fn navigation(url: &str, ready: ReadyState, reason: impl Into<String>) -> Self {
        DriverError::Navigation {
            url: url.to_string(),
            ready,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_carries_locator() {
        let err = DriverError::interaction(&Locator::css("button.login"), "not visible within 30000ms");
        let display = err.to_string();
        assert!(display.contains("css=button.login"));
        assert!(display.contains("not visible"));
    }

    #[test]
    fn test_navigation_carries_url_and_criterion() {
        let err = DriverError::navigation("https://example.com", ReadyState::NetworkIdle, "timeout");
        let display = err.to_string();
        assert!(display.contains("https://example.com"));
        assert!(display.contains("networkidle"));
    }

    #[test]
    fn test_closed_display() {
        assert_eq!(DriverError::Closed.to_string(), "Session closed");
    }
}
