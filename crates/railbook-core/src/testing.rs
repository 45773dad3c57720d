//! Recording test doubles for the driver and collaborator traits.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use railbook_protocols::{
    ArtifactEmitter, ArtifactError, BrowserLauncher, DriverError, Locator, NotificationError,
    Notifier, PageDriver, ReadyState, SessionConfig, TicketRecord,
};

/// What the mock page should do besides recording.
#[derive(Default)]
pub struct Script {
    /// Any operation targeting this locator fails like a timeout.
    pub fail_at: Option<Locator>,
    pub fail_goto: bool,
    /// Any operation targeting this locator panics.
    pub panic_at: Option<Locator>,
    /// Visible text answered by `text_of` and `probe_text`.
    pub visible_text: HashMap<Locator, String>,
    pub fail_new_context: bool,
}

/// Shared log of every call made on the pages of one browser.
#[derive(Default)]
pub struct Recorder {
    pub script: Script,
    calls: Mutex<Vec<String>>,
    primary_closes: AtomicUsize,
    context_closes: AtomicUsize,
}

impl Recorder {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn primary_closes(&self) -> usize {
        self.primary_closes.load(Ordering::SeqCst)
    }

    pub fn context_closes(&self) -> usize {
        self.context_closes.load(Ordering::SeqCst)
    }

    /// Whether any recorded call contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.calls.lock().iter().any(|c| c.contains(needle))
    }
}

pub struct MockPage {
    rec: Arc<Recorder>,
    primary: bool,
}

impl MockPage {
    pub fn new(rec: Arc<Recorder>) -> Self {
        Self { rec, primary: true }
    }

    fn record(&self, call: String) {
        let prefix = if self.primary { "" } else { "ctx:" };
        self.rec.calls.lock().push(format!("{}{}", prefix, call));
    }

    fn check(&self, target: &Locator) -> Result<(), DriverError> {
        if self.rec.script.panic_at.as_ref() == Some(target) {
            panic!("injected panic at {}", target);
        }
        if self.rec.script.fail_at.as_ref() == Some(target) {
            return Err(DriverError::interaction(target, "not visible within 30000ms"));
        }
        Ok(())
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn goto(&self, url: &str, ready: ReadyState) -> Result<(), DriverError> {
        self.record(format!("goto {} {}", url, ready));
        if self.rec.script.fail_goto {
            return Err(DriverError::navigation(url, ready, "timed out"));
        }
        Ok(())
    }

    async fn activate(&self, target: &Locator, _timeout: Option<Duration>) -> Result<(), DriverError> {
        self.record(format!("activate {}", target));
        self.check(target)
    }

    async fn enter_text(&self, target: &Locator, text: &str, _delay: Duration) -> Result<(), DriverError> {
        self.record(format!("enter {} = {}", target, text));
        self.check(target)
    }

    async fn press_key(&self, target: &Locator, key: &str) -> Result<(), DriverError> {
        self.record(format!("key {} {}", target, key));
        self.check(target)
    }

    async fn choose_option(&self, target: &Locator, value: &str) -> Result<(), DriverError> {
        self.record(format!("choose {} = {}", target, value));
        self.check(target)
    }

    async fn wait_visible(&self, target: &Locator, _timeout: Option<Duration>) -> Result<(), DriverError> {
        self.record(format!("wait {}", target));
        self.check(target)
    }

    async fn text_of(&self, target: &Locator, _timeout: Option<Duration>) -> Result<String, DriverError> {
        self.record(format!("text {}", target));
        self.check(target)?;
        Ok(self
            .rec
            .script
            .visible_text
            .get(target)
            .cloned()
            .unwrap_or_default())
    }

    async fn probe_text(&self, target: &Locator) -> Result<Option<String>, DriverError> {
        self.record(format!("probe {}", target));
        Ok(self.rec.script.visible_text.get(target).cloned())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.record("screenshot".to_string());
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }

    async fn pause(&self, duration: Duration) {
        self.record(format!("pause {}ms", duration.as_millis()));
    }

    async fn new_context(&self) -> Result<Box<dyn PageDriver>, DriverError> {
        self.record("new_context".to_string());
        if self.rec.script.fail_new_context {
            return Err(DriverError::Other("tab limit".to_string()));
        }
        Ok(Box::new(MockPage {
            rec: self.rec.clone(),
            primary: false,
        }))
    }

    async fn close(&self) {
        self.record("close".to_string());
        if self.primary {
            self.rec.primary_closes.fetch_add(1, Ordering::SeqCst);
        } else {
            self.rec.context_closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub struct MockLauncher {
    pub rec: Arc<Recorder>,
    pub fail: bool,
    opens: AtomicUsize,
}

impl MockLauncher {
    pub fn new(rec: Arc<Recorder>) -> Self {
        Self {
            rec,
            fail: false,
            opens: AtomicUsize::new(0),
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    async fn open(&self, _config: &SessionConfig) -> Result<Box<dyn PageDriver>, DriverError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DriverError::SessionInit("chrome not found".to_string()));
        }
        Ok(Box::new(MockPage::new(self.rec.clone())))
    }
}

#[derive(Default)]
pub struct MockEmitter {
    pub fail_for: Vec<String>,
    pub panic_for: Option<String>,
    pub emitted: Mutex<Vec<TicketRecord>>,
}

impl MockEmitter {
    pub fn emitted(&self) -> Vec<TicketRecord> {
        self.emitted.lock().clone()
    }
}

#[async_trait]
impl ArtifactEmitter for MockEmitter {
    async fn emit(&self, record: &TicketRecord) -> Result<PathBuf, ArtifactError> {
        self.emitted.lock().push(record.clone());
        if self.panic_for.as_deref() == Some(record.passenger_name.as_str()) {
            panic!("injected panic for {}", record.passenger_name);
        }
        if self.fail_for.contains(&record.passenger_name) {
            return Err(ArtifactError::Render("disk full".to_string()));
        }
        Ok(PathBuf::from(format!("tickets/{}.pdf", record.passenger_name)))
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub fail_for: Vec<String>,
    pub panic_for: Option<String>,
    pub dispatched: Mutex<Vec<String>>,
}

impl MockNotifier {
    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched.lock().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn dispatch(
        &self,
        page: &dyn PageDriver,
        passenger_name: &str,
        _origin: &str,
        _destination: &str,
    ) -> Result<(), NotificationError> {
        self.dispatched.lock().push(passenger_name.to_string());
        page.goto("https://chat.test/", ReadyState::DomContentLoaded)
            .await?;
        if self.panic_for.as_deref() == Some(passenger_name) {
            panic!("injected panic for {}", passenger_name);
        }
        if self.fail_for.iter().any(|n| n == passenger_name) {
            return Err(NotificationError::ContactNotFound(passenger_name.to_string()));
        }
        Ok(())
    }
}
