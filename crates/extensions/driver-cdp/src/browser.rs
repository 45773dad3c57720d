//! Shared handle on one connected browser.

use tokio::process::Child;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cdp::CdpClient;

/// Connected browser plus the Chrome process, when we launched it.
pub struct BrowserHandle {
    pub(crate) client: CdpClient,
    chrome: Mutex<Option<Child>>,
}

impl BrowserHandle {
    pub(crate) fn new(client: CdpClient, chrome: Option<Child>) -> Self {
        Self {
            client,
            chrome: Mutex::new(chrome),
        }
    }

    /// Whether this handle owns the Chrome process.
    pub async fn owns_process(&self) -> bool {
        self.chrome.lock().await.is_some()
    }

    /// Close the browser if we launched it; otherwise leave it running.
    pub async fn shutdown(&self) {
        let Some(mut child) = self.chrome.lock().await.take() else {
            debug!("Browser was not launched by us, leaving it running");
            return;
        };

        info!("Shutting down Chrome...");
        if let Err(e) = self.client.close_browser().await {
            debug!("Browser.close failed, killing process: {}", e);
        }
        let _ = child.kill().await;
    }
}
