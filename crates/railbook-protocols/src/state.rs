//! Booking run states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Linear booking state machine.
///
/// A run moves strictly forward through these states. Every run ends in
/// [`BookingState::Terminated`], whether it succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookingState {
    Idle,
    SessionOpen,
    Navigated,
    SearchSubmitted,
    TrainSelected,
    Authenticated,
    PassengersEntered,
    ContactEntered,
    PaymentReached,
    PaymentSubmitted,
    ArtifactsEmitted,
    NotificationsSent,
    Terminated,
}

impl BookingState {
    /// All states in order.
    pub const ALL: [BookingState; 13] = [
        BookingState::Idle,
        BookingState::SessionOpen,
        BookingState::Navigated,
        BookingState::SearchSubmitted,
        BookingState::TrainSelected,
        BookingState::Authenticated,
        BookingState::PassengersEntered,
        BookingState::ContactEntered,
        BookingState::PaymentReached,
        BookingState::PaymentSubmitted,
        BookingState::ArtifactsEmitted,
        BookingState::NotificationsSent,
        BookingState::Terminated,
    ];

    /// The state that follows this one, `None` for `Terminated`.
    pub fn next(self) -> Option<BookingState> {
        let idx = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Whether a failure while entering this state aborts the run.
    ///
    /// Form steps are fail-fast; artifact and notification steps continue
    /// past per-passenger failures.
    pub fn is_fail_fast(self) -> bool {
        self >= BookingState::SessionOpen && self <= BookingState::PaymentSubmitted
    }

    pub fn name(self) -> &'static str {
        match self {
            BookingState::Idle => "Idle",
            BookingState::SessionOpen => "SessionOpen",
            BookingState::Navigated => "Navigated",
            BookingState::SearchSubmitted => "SearchSubmitted",
            BookingState::TrainSelected => "TrainSelected",
            BookingState::Authenticated => "Authenticated",
            BookingState::PassengersEntered => "PassengersEntered",
            BookingState::ContactEntered => "ContactEntered",
            BookingState::PaymentReached => "PaymentReached",
            BookingState::PaymentSubmitted => "PaymentSubmitted",
            BookingState::ArtifactsEmitted => "ArtifactsEmitted",
            BookingState::NotificationsSent => "NotificationsSent",
            BookingState::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_forward() {
        assert_eq!(BookingState::Idle.next(), Some(BookingState::SessionOpen));
        assert_eq!(
            BookingState::PaymentSubmitted.next(),
            Some(BookingState::ArtifactsEmitted)
        );
        assert_eq!(BookingState::Terminated.next(), None);
    }

    #[test]
    fn test_fail_fast_boundary() {
        assert!(!BookingState::Idle.is_fail_fast());
        assert!(BookingState::SessionOpen.is_fail_fast());
        assert!(BookingState::TrainSelected.is_fail_fast());
        assert!(BookingState::PaymentSubmitted.is_fail_fast());
        assert!(!BookingState::ArtifactsEmitted.is_fail_fast());
        assert!(!BookingState::NotificationsSent.is_fail_fast());
    }

    #[test]
    fn test_display() {
        assert_eq!(BookingState::Authenticated.to_string(), "Authenticated");
    }
}
