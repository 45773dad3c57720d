//! Fixed pauses for steps only a person can complete.

use std::time::Duration;

use railbook_protocols::PageDriver;
use tracing::{debug, info};

/// A named, fixed-length wait.
///
/// The gate never returns early: there is no signal from the page that the
/// person has finished, so the run simply waits out the full duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanGate {
    name: String,
    duration: Duration,
}

impl HumanGate {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Block the run on `page` for the gate's duration.
    pub async fn hold(&self, page: &dyn PageDriver) {
        if self.duration.is_zero() {
            debug!("Skipping {} gate (zero duration)", self.name);
            return;
        }

        info!(
            "Waiting {}s for {} in the browser window",
            self.duration.as_secs_f32(),
            self.name
        );
        page.pause(self.duration).await;
        debug!("{} gate released", self.name);
    }
}
