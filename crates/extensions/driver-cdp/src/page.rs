//! [`PageDriver`] over one CDP page session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use railbook_protocols::{DriverError, Locator, PageDriver, ReadyState};
use tracing::{debug, warn};

use crate::browser::BrowserHandle;
use crate::cdp::{CdpError, ElementProbe, PageSession};
use crate::keys::{named_key, replace_text_plan, Keystroke};
use crate::locator_js::{
    choose_option_script, focus_script, probe_script, ELEMENT_MISSING, OPTION_CHOSEN,
    OPTION_MISSING, OPTION_NOT_SELECT,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One browser tab.
///
/// The primary page owns the browser: closing it shuts down a Chrome we
/// launched. Secondary pages only close their own tab.
pub struct CdpPage {
    browser: Arc<BrowserHandle>,
    session: PageSession,
    default_timeout: Duration,
    viewport: (u32, u32),
    primary: bool,
    closed: AtomicBool,
}

fn interaction_error(target: &Locator, e: CdpError) -> DriverError {
    match e {
        CdpError::SessionClosed => DriverError::Closed,
        other => DriverError::interaction(target, other.to_string()),
    }
}

impl CdpPage {
    pub(crate) fn new(
        browser: Arc<BrowserHandle>,
        session: PageSession,
        default_timeout: Duration,
        viewport_width: u32,
        viewport_height: u32,
        primary: bool,
    ) -> Self {
        Self {
            browser,
            session,
            default_timeout,
            viewport: (viewport_width, viewport_height),
            primary,
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed.load(Ordering::SeqCst) {
            Err(DriverError::Closed)
        } else {
            Ok(())
        }
    }

    async fn probe(&self, target: &Locator) -> Result<ElementProbe, DriverError> {
        self.ensure_open()?;
        self.session
            .evaluate_as::<ElementProbe>(&probe_script(target))
            .await
            .map_err(|e| interaction_error(target, e))
    }

    /// Poll until `target` is visible.
    async fn wait_for(
        &self,
        target: &Locator,
        timeout: Option<Duration>,
    ) -> Result<ElementProbe, DriverError> {
        let timeout = timeout.unwrap_or(self.default_timeout);
        let start = Instant::now();

        loop {
            let probe = self.probe(target).await?;
            if probe.visible {
                return Ok(probe);
            }

            if start.elapsed() > timeout {
                let reason = if probe.found {
                    format!("not visible within {}ms", timeout.as_millis())
                } else {
                    format!("not found within {}ms", timeout.as_millis())
                };
                return Err(DriverError::interaction(target, reason));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn focus(&self, target: &Locator) -> Result<(), DriverError> {
        let focused = self
            .session
            .evaluate(&focus_script(target))
            .await
            .map_err(|e| interaction_error(target, e))?;
        if focused.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(DriverError::interaction(target, "element did not take focus"))
        }
    }
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn goto(&self, url: &str, ready: ReadyState) -> Result<(), DriverError> {
        self.ensure_open()?;
        url::Url::parse(url).map_err(|e| DriverError::navigation(url, ready, e.to_string()))?;

        let result = async {
            let navigation = self.session.navigate(url).await?;
            self.session
                .wait_for_ready(&navigation, ready, self.default_timeout)
                .await
        }
        .await;

        match result {
            Ok(()) => {
                debug!("Navigated to {} ({})", url, ready);
                Ok(())
            }
            Err(CdpError::SessionClosed) => Err(DriverError::Closed),
            Err(e) => Err(DriverError::navigation(url, ready, e.to_string())),
        }
    }

    async fn activate(&self, target: &Locator, timeout: Option<Duration>) -> Result<(), DriverError> {
        let probe = self.wait_for(target, timeout).await?;
        self.session
            .click(probe.x, probe.y)
            .await
            .map_err(|e| interaction_error(target, e))
    }

    async fn enter_text(&self, target: &Locator, text: &str, delay: Duration) -> Result<(), DriverError> {
        self.wait_for(target, None).await?;
        self.focus(target).await?;

        let mut typed_any = false;
        for stroke in replace_text_plan(text) {
            if matches!(stroke, Keystroke::Char(_)) {
                if typed_any && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                typed_any = true;
            }
            self.session
                .keystroke(&stroke)
                .await
                .map_err(|e| interaction_error(target, e))?;
        }
        Ok(())
    }

    async fn press_key(&self, target: &Locator, key: &str) -> Result<(), DriverError> {
        let key_def = named_key(key)
            .ok_or_else(|| DriverError::interaction(target, format!("unknown key '{}'", key)))?;
        self.wait_for(target, None).await?;
        self.focus(target).await?;
        self.session
            .press(&key_def)
            .await
            .map_err(|e| interaction_error(target, e))
    }

    async fn choose_option(&self, target: &Locator, value: &str) -> Result<(), DriverError> {
        self.wait_for(target, None).await?;
        let outcome = self
            .session
            .evaluate(&choose_option_script(target, value))
            .await
            .map_err(|e| interaction_error(target, e))?;

        match outcome.as_str() {
            Some(OPTION_CHOSEN) => Ok(()),
            Some(OPTION_NOT_SELECT) => Err(DriverError::interaction(target, "element is not a <select>")),
            Some(OPTION_MISSING) => Err(DriverError::interaction(
                target,
                format!("no option with value or label '{}'", value),
            )),
            Some(ELEMENT_MISSING) => Err(DriverError::interaction(target, "element disappeared")),
            _ => Err(DriverError::interaction(target, format!("unexpected result {}", outcome))),
        }
    }

    async fn wait_visible(&self, target: &Locator, timeout: Option<Duration>) -> Result<(), DriverError> {
        self.wait_for(target, timeout).await.map(|_| ())
    }

    async fn text_of(&self, target: &Locator, timeout: Option<Duration>) -> Result<String, DriverError> {
        let probe = self.wait_for(target, timeout).await?;
        Ok(probe.text.unwrap_or_default())
    }

    async fn probe_text(&self, target: &Locator) -> Result<Option<String>, DriverError> {
        let probe = self.probe(target).await?;
        Ok(if probe.visible {
            Some(probe.text.unwrap_or_default())
        } else {
            None
        })
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.ensure_open()?;
        let data = self.session.screenshot().await?;
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| DriverError::Other(format!("screenshot decode: {}", e)))
    }

    async fn new_context(&self) -> Result<Box<dyn PageDriver>, DriverError> {
        self.ensure_open()?;
        let session = self.browser.client.new_page(Some("about:blank")).await?;
        if let Err(e) = session.set_viewport(self.viewport.0, self.viewport.1).await {
            warn!("Failed to size new page: {}", e);
        }

        Ok(Box::new(CdpPage::new(
            self.browser.clone(),
            session,
            self.default_timeout,
            self.viewport.0,
            self.viewport.1,
            false,
        )))
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        if self.primary && self.browser.owns_process().await {
            self.browser.shutdown().await;
            return;
        }

        if let Err(e) = self.browser.client.close_page(&self.session).await {
            warn!("Failed to close page {}: {}", self.session.target_id(), e);
        }
    }
}
