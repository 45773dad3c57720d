//! Driver traits.

use std::time::Duration;

use async_trait::async_trait;

use super::{Locator, ReadyState, SessionConfig};
use crate::error::DriverError;

/// Starts a controllable browser page.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Open a live page session sized and timed per `config`.
    ///
    /// Fails with [`DriverError::SessionInit`] when the engine cannot start.
    async fn open(&self, config: &SessionConfig) -> Result<Box<dyn PageDriver>, DriverError>;
}

/// Primitive operations on one page.
///
/// Every waiting operation takes an optional timeout; `None` means the
/// session's default timeout.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate and block until `ready` holds.
    async fn goto(&self, url: &str, ready: ReadyState) -> Result<(), DriverError>;

    /// Wait until the element is visible, then click it.
    async fn activate(&self, target: &Locator, timeout: Option<Duration>) -> Result<(), DriverError>;

    /// Wait for visibility, clear the element, then type `text` one
    /// character at a time, sleeping `delay` between characters.
    async fn enter_text(&self, target: &Locator, text: &str, delay: Duration) -> Result<(), DriverError>;

    /// Focus the element and send a named key (`Enter`, `Tab`, ...).
    async fn press_key(&self, target: &Locator, key: &str) -> Result<(), DriverError>;

    /// Select an option of a `<select>` by value or visible label.
    async fn choose_option(&self, target: &Locator, value: &str) -> Result<(), DriverError>;

    /// Wait until the element is visible without acting on it.
    async fn wait_visible(&self, target: &Locator, timeout: Option<Duration>) -> Result<(), DriverError>;

    /// Wait for visibility and return the element's trimmed visible text.
    async fn text_of(&self, target: &Locator, timeout: Option<Duration>) -> Result<String, DriverError>;

    /// Visible text of the element if it is visible right now.
    async fn probe_text(&self, target: &Locator) -> Result<Option<String>, DriverError>;

    /// PNG capture of the current viewport.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;

    /// Suspend the calling flow for exactly `duration`.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Open another independent page on the same browser.
    async fn new_context(&self) -> Result<Box<dyn PageDriver>, DriverError>;

    /// Tear the session down. Idempotent; failures are logged, never raised.
    async fn close(&self);
}
