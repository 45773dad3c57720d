//! Booking domain types.

mod journey;
mod records;

pub use journey::*;
pub use records::*;
