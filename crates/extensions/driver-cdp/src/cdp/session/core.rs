//! Core session struct and CDP command dispatch.

use serde_json::{json, Value};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::cdp::client::Transport;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

/// A session attached to a single page/target.
pub struct PageSession {
    /// Target ID.
    pub(super) target_id: String,
    /// Session ID for this target.
    pub(super) session_id: String,
    /// Command channel shared with the client.
    pub(super) transport: Transport,
    /// Events the client routed to this session.
    pub(super) events: Mutex<mpsc::UnboundedReceiver<CdpResponse>>,
}

impl PageSession {
    /// Create a new page session.
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        transport: Transport,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            transport,
            events: Mutex::new(event_rx),
        }
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Page.setLifecycleEventsEnabled", Some(json!({"enabled": true})))
            .await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        self.call("Network.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Override the layout viewport.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(json!({
                "width": width,
                "height": height,
                "deviceScaleFactor": 1,
                "mobile": false,
            })),
        )
        .await?;
        Ok(())
    }

    /// Capture the viewport as base64 PNG.
    pub async fn screenshot(&self) -> Result<String, CdpError> {
        let params = json!({
            "format": "png",
            "captureBeyondViewport": false,
        });

        let result = self.call("Page.captureScreenshot", Some(params)).await?;

        result["data"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| CdpError::InvalidResponse("Missing screenshot data".to_string()))
    }
}
