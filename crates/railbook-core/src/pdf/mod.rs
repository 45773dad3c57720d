//! PDF ticket output.
//!
//! A single-page PDF 1.4 writer using the standard Helvetica fonts, so no
//! font files are embedded.

mod document;
mod emitter;
mod ticket;

pub use document::{Font, PdfDocument};
pub use emitter::{ticket_file_name, PdfTicketEmitter};
pub use ticket::render_ticket;
