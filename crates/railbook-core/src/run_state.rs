//! Per-run bookkeeping owned by the orchestrator.

use std::path::PathBuf;

use railbook_protocols::{BookingError, BookingState, TicketRecord};
use tracing::info;

/// Mutable state of one run. Single writer: the orchestrator.
#[derive(Debug)]
pub struct RunState {
    /// Last state fully reached.
    reached: BookingState,
    /// Driver action currently being attempted.
    step: &'static str,
    session_live: bool,
    records: Vec<TicketRecord>,
    artifact_paths: Vec<PathBuf>,
    artifact_failures: Vec<BookingError>,
    notifications_enabled: bool,
    notifications_sent: usize,
    notification_failures: Vec<BookingError>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            reached: BookingState::Idle,
            step: "start",
            session_live: false,
            records: Vec::new(),
            artifact_paths: Vec::new(),
            artifact_failures: Vec::new(),
            notifications_enabled: false,
            notifications_sent: 0,
            notification_failures: Vec::new(),
        }
    }

    pub fn reached(&self) -> BookingState {
        self.reached
    }

    /// The state being entered: the one after the last reached.
    pub fn attempting(&self) -> BookingState {
        self.reached.next().unwrap_or(BookingState::Terminated)
    }

    pub fn step(&self) -> &'static str {
        self.step
    }

    pub fn set_step(&mut self, step: &'static str) {
        self.step = step;
    }

    /// Mark the attempted state as reached and log progress.
    pub fn complete_step(&mut self) {
        self.reached = self.attempting();
        info!("[{}] done", self.reached);
    }

    pub fn session_live(&self) -> bool {
        self.session_live
    }

    pub fn set_session_live(&mut self, live: bool) {
        self.session_live = live;
    }

    pub fn set_records(&mut self, records: Vec<TicketRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[TicketRecord] {
        &self.records
    }

    pub fn add_artifact(&mut self, path: PathBuf) {
        self.artifact_paths.push(path);
    }

    pub fn add_artifact_failure(&mut self, error: BookingError) {
        self.artifact_failures.push(error);
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
    }

    pub fn add_notification_sent(&mut self) {
        self.notifications_sent += 1;
    }

    pub fn add_notification_failure(&mut self, error: BookingError) {
        self.notification_failures.push(error);
    }

    /// Close out the run as terminated.
    pub fn terminate(&mut self) {
        self.reached = BookingState::Terminated;
        self.session_live = false;
    }

    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            final_state: self.reached,
            records: self.records,
            artifact_paths: self.artifact_paths,
            artifact_failures: self.artifact_failures,
            notifications_enabled: self.notifications_enabled,
            notifications_sent: self.notifications_sent,
            notification_failures: self.notification_failures,
        }
    }
}

/// Result of a run that got past payment.
#[derive(Debug)]
pub struct RunOutcome {
    pub final_state: BookingState,
    /// One record per passenger, in passenger order.
    pub records: Vec<TicketRecord>,
    pub artifact_paths: Vec<PathBuf>,
    pub artifact_failures: Vec<BookingError>,
    pub notifications_enabled: bool,
    pub notifications_sent: usize,
    pub notification_failures: Vec<BookingError>,
}

impl Default for RunOutcome {
    fn default() -> Self {
        RunState::new().into_outcome()
    }
}

impl RunOutcome {
    /// Whether any ticket or notification failed.
    pub fn is_partial(&self) -> bool {
        !self.artifact_failures.is_empty() || !self.notification_failures.is_empty()
    }
}
