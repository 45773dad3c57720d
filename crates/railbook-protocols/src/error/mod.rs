//! Error types for the railbook protocol layer.

mod booking;
mod collaborator;
mod driver;

pub use booking::*;
pub use collaborator::*;
pub use driver::*;
