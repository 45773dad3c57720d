//! Step-tagged booking errors.

use thiserror::Error;

use super::{ArtifactError, DriverError, NotificationError};
use crate::state::BookingState;

/// A run-level failure, tagged with the phase being entered and the step
/// (driver action) that failed inside it.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("[{phase}/{step}] could not open browser session: {source}")]
    SessionInit {
        phase: BookingState,
        step: String,
        #[source]
        source: DriverError,
    },

    #[error("[{phase}/{step}] navigation failed: {source}")]
    Navigation {
        phase: BookingState,
        step: String,
        #[source]
        source: DriverError,
    },

    #[error("[{phase}/{step}] interaction failed: {source}")]
    Interaction {
        phase: BookingState,
        step: String,
        #[source]
        source: DriverError,
    },

    #[error("[{phase}/{step}] login rejected: {message}")]
    Authentication {
        phase: BookingState,
        step: String,
        message: String,
    },

    #[error("[{phase}/{step}] ticket for {passenger} not generated: {source}")]
    Artifact {
        phase: BookingState,
        step: String,
        passenger: String,
        #[source]
        source: ArtifactError,
    },

    #[error("[{phase}/{step}] notification for {passenger} not sent: {source}")]
    Notification {
        phase: BookingState,
        step: String,
        passenger: String,
        #[source]
        source: NotificationError,
    },

    #[error("[{phase}/{step}] unexpected failure: {message}")]
    Unknown {
        phase: BookingState,
        step: String,
        message: String,
    },
}

impl BookingError {
    /// Wrap a driver failure raised while entering `phase`.
    pub fn from_driver(phase: BookingState, step: impl Into<String>, source: DriverError) -> Self {
        let step = step.into();
        match source {
            DriverError::SessionInit(_) => BookingError::SessionInit { phase, step, source },
            DriverError::Navigation { .. } => BookingError::Navigation { phase, step, source },
            DriverError::Interaction { .. } => BookingError::Interaction { phase, step, source },
            other => BookingError::Unknown {
                phase,
                step,
                message: other.to_string(),
            },
        }
    }

    pub fn phase(&self) -> BookingState {
        match self {
            BookingError::SessionInit { phase, .. }
            | BookingError::Navigation { phase, .. }
            | BookingError::Interaction { phase, .. }
            | BookingError::Authentication { phase, .. }
            | BookingError::Artifact { phase, .. }
            | BookingError::Notification { phase, .. }
            | BookingError::Unknown { phase, .. } => *phase,
        }
    }

    pub fn step(&self) -> &str {
        match self {
            BookingError::SessionInit { step, .. }
            | BookingError::Navigation { step, .. }
            | BookingError::Interaction { step, .. }
            | BookingError::Authentication { step, .. }
            | BookingError::Artifact { step, .. }
            | BookingError::Notification { step, .. }
            | BookingError::Unknown { step, .. } => step,
        }
    }

    /// Taxonomy name, as shown in the run summary.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::SessionInit { .. } => "SessionInitError",
            BookingError::Navigation { .. } => "NavigationError",
            BookingError::Interaction { .. } => "InteractionError",
            BookingError::Authentication { .. } => "AuthenticationError",
            BookingError::Artifact { .. } => "ArtifactError",
            BookingError::Notification { .. } => "NotificationError",
            BookingError::Unknown { .. } => "UnknownError",
        }
    }
}
