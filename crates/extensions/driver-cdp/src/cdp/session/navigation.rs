//! Navigation operations for CDP page session.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use railbook_protocols::ReadyState;
use serde_json::json;
use tracing::{debug, trace};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{CdpResponse, LifecycleEvent};

use super::core::PageSession;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet window with no new resource entries before the network counts as idle.
const NETWORK_QUIET: Duration = Duration::from_millis(500);

/// Whether `document.readyState` satisfies the criterion.
///
/// `NetworkIdle` additionally needs a quiet network, checked separately.
pub(super) fn document_ready(ready: ReadyState, doc_state: &str) -> bool {
    match ready {
        ReadyState::DomContentLoaded => doc_state == "interactive" || doc_state == "complete",
        ReadyState::Load | ReadyState::NetworkIdle => doc_state == "complete",
    }
}

/// A navigation started by [`PageSession::navigate`].
#[derive(Debug, Clone)]
pub struct Navigation {
    pub frame_id: String,
    /// Loader of the new document. `None` for same-document navigations.
    pub loader_id: Option<String>,
}

/// Lifecycle milestones seen for one document load.
///
/// Events from any other frame or loader, such as the document being
/// replaced, are ignored.
#[derive(Debug)]
pub(super) struct LifecycleWatch {
    frame_id: String,
    loader_id: String,
    seen: HashSet<String>,
}

impl LifecycleWatch {
    pub(super) fn new(frame_id: &str, loader_id: &str) -> Self {
        Self {
            frame_id: frame_id.to_string(),
            loader_id: loader_id.to_string(),
            seen: HashSet::new(),
        }
    }

    pub(super) fn observe(&mut self, event: &CdpResponse) {
        if event.method.as_deref() != Some("Page.lifecycleEvent") {
            return;
        }
        let Some(params) = event.params.clone() else {
            return;
        };
        let Ok(lifecycle) = serde_json::from_value::<LifecycleEvent>(params) else {
            return;
        };
        if lifecycle.frame_id == self.frame_id && lifecycle.loader_id == self.loader_id {
            trace!("Lifecycle {} for loader {}", lifecycle.name, self.loader_id);
            self.seen.insert(lifecycle.name);
        }
    }

    pub(super) fn reached(&self, ready: ReadyState) -> bool {
        let load = self.seen.contains("load");
        match ready {
            ReadyState::DomContentLoaded => load || self.seen.contains("DOMContentLoaded"),
            ReadyState::Load => load,
            ReadyState::NetworkIdle => load && self.seen.contains("networkIdle"),
        }
    }
}

impl PageSession {
    /// Navigate to URL without waiting.
    pub async fn navigate(&self, url: &str) -> Result<Navigation, CdpError> {
        // Events from earlier documents are of no further use
        {
            let mut events = self.events.lock().await;
            while events.try_recv().is_ok() {}
        }

        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        let navigation = Navigation {
            frame_id: result["frameId"].as_str().unwrap_or("main").to_string(),
            loader_id: result["loaderId"].as_str().map(str::to_string),
        };

        debug!("Navigation to {} started ({:?})", url, navigation.loader_id);
        Ok(navigation)
    }

    /// Wait until the document `navigation` loaded meets `ready`, or
    /// `timeout` elapses.
    pub async fn wait_for_ready(
        &self,
        navigation: &Navigation,
        ready: ReadyState,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let waited = match &navigation.loader_id {
            Some(loader_id) => {
                let watch = LifecycleWatch::new(&navigation.frame_id, loader_id);
                tokio::time::timeout(timeout, self.wait_lifecycle(watch, ready)).await
            }
            // No new document, so the current one is the right one to poll
            None => tokio::time::timeout(timeout, self.poll_ready_state(ready)).await,
        };

        match waited {
            Ok(result) => result,
            Err(_) => Err(CdpError::Timeout(format!(
                "page not {} within {}ms",
                ready,
                timeout.as_millis()
            ))),
        }
    }

    async fn wait_lifecycle(
        &self,
        mut watch: LifecycleWatch,
        ready: ReadyState,
    ) -> Result<(), CdpError> {
        let mut events = self.events.lock().await;
        while !watch.reached(ready) {
            let event = events.recv().await.ok_or(CdpError::SessionClosed)?;
            watch.observe(&event);
        }
        Ok(())
    }

    async fn poll_ready_state(&self, ready: ReadyState) -> Result<(), CdpError> {
        let mut resource_count: Option<u64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let result = self.evaluate("document.readyState").await?;
            let doc_state = result.as_str().unwrap_or("");

            if document_ready(ready, doc_state) {
                if ready != ReadyState::NetworkIdle {
                    return Ok(());
                }

                let count = self
                    .evaluate("performance.getEntriesByType('resource').length")
                    .await?
                    .as_u64()
                    .unwrap_or(0);

                if resource_count != Some(count) {
                    resource_count = Some(count);
                    quiet_since = Instant::now();
                } else if quiet_since.elapsed() >= NETWORK_QUIET {
                    return Ok(());
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
