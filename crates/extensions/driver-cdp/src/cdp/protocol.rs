//! Wire types for the DevTools JSON-RPC channel and HTTP discovery endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command. Commands for a tab carry its flattened `sessionId`.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Incoming frame: a command reply when `id` is set, an event otherwise.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Params of a `Page.lifecycleEvent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub frame_id: String,
    pub loader_id: String,
    pub name: String,
}

/// Target created by `PUT /json/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTarget {
    pub id: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /json/version`. Chrome mixes key casing here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// What the in-page probe script reports about one element.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementProbe {
    pub found: bool,
    pub visible: bool,
    /// Centre of the element's box, viewport coordinates.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    None,
    Left,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MousePressed,
    MouseReleased,
    MouseMoved,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEventType {
    KeyDown,
    KeyUp,
    RawKeyDown,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
