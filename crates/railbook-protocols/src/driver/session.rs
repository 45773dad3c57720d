//! Session tuning and navigation readiness.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a page session is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Timeout applied to waits when an operation does not pass its own.
    pub default_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: false,
            viewport_width: 1280,
            viewport_height: 720,
            default_timeout: Duration::from_secs(30),
        }
    }
}

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    /// `document.readyState == "complete"`.
    #[default]
    Load,
    /// `document.readyState` is `interactive` or `complete`.
    DomContentLoaded,
    /// Loaded, and no new resource entries for a quiet window.
    NetworkIdle,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyState::Load => "load",
            ReadyState::DomContentLoaded => "domcontentloaded",
            ReadyState::NetworkIdle => "networkidle",
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadyState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "load" => Ok(ReadyState::Load),
            "domcontentloaded" => Ok(ReadyState::DomContentLoaded),
            "networkidle" => Ok(ReadyState::NetworkIdle),
            other => Err(format!("unknown readiness criterion '{}'", other)),
        }
    }
}
