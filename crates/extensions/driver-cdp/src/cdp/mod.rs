//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chrome/Chromium via WebSocket and speaks the CDP JSON-RPC
//! protocol. One [`CdpClient`] per browser; one [`PageSession`] per tab.

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
