//! Interaction-driver contract.
//!
//! The orchestrator only ever talks to a page through [`PageDriver`]; the
//! production implementation lives in the CDP driver crate and tests use
//! recording fakes.

mod locator;
mod session;
mod traits;

pub use locator::{xpath_literal, Locator};
pub use session::{ReadyState, SessionConfig};
pub use traits::{BrowserLauncher, PageDriver};

#[cfg(test)]
#[path = "locator_tests.rs"]
mod locator_tests;
