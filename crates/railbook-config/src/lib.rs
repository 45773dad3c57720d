//! # Railbook Config
//!
//! TOML configuration for a booking run: journey, credentials, contact and
//! payment records, browser tuning, human-gate durations, notification and
//! artifact settings, and per-site locator overrides.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
