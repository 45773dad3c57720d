//! # Railbook Protocols
//!
//! Shared definitions for the railbook workspace: the booking domain types,
//! the interaction-driver traits, the artifact and notification collaborator
//! traits, and the error taxonomy. Contains no browser or file-system code.
//!
//! ## Core Traits
//!
//! - [`BrowserLauncher`] - Opens a live page session
//! - [`PageDriver`] - Primitive page operations (goto, activate, enter text, ...)
//! - [`ArtifactEmitter`] - Turns a [`TicketRecord`] into a file
//! - [`Notifier`] - Sends one passenger notification through a page session

pub mod artifact;
pub mod driver;
pub mod error;
pub mod notify;
pub mod state;
pub mod types;

pub use artifact::ArtifactEmitter;
pub use driver::{BrowserLauncher, Locator, PageDriver, ReadyState, SessionConfig};
pub use error::{ArtifactError, BookingError, DriverError, NotificationError};
pub use notify::Notifier;
pub use state::BookingState;
pub use types::*;
