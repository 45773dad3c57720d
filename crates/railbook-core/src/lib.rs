//! # Railbook Core
//!
//! Runs one ticket booking end to end.
//!
//! ## Components
//!
//! - [`BookingOrchestrator`] - Walks the booking state machine over a [`PageDriver`]
//! - [`BookingPlan`] - Validated inputs for one run, built from configuration
//! - [`LocatorTable`] - Every element target the run touches, by name
//! - [`HumanGate`] - Fixed pause for manual challenge entry
//! - [`PdfTicketEmitter`] - Writes one PDF ticket per passenger
//! - [`WhatsAppNotifier`] - Sends the confirmation message through a chat web client
//!
//! [`PageDriver`]: railbook_protocols::PageDriver

pub mod exit;
pub mod human_gate;
pub mod notifier;
pub mod orchestrator;
pub mod pdf;
pub mod plan;
pub mod run_state;
pub mod site;

#[cfg(test)]
mod testing;

pub use exit::{exit_status, EXIT_FAILURE, EXIT_OK, EXIT_PARTIAL};
pub use human_gate::HumanGate;
pub use notifier::{render_message, WhatsAppNotifier};
pub use orchestrator::BookingOrchestrator;
pub use pdf::PdfTicketEmitter;
pub use plan::{BookingPlan, NotificationPlan, PlanError};
pub use run_state::{RunOutcome, RunState};
pub use site::{ChatLocators, LocatorTable};
