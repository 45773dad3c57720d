//! Chrome DevTools Protocol page driver for railbook.
//!
//! [`CdpLauncher`] starts (or attaches to) a local Chrome and hands out
//! [`CdpPage`]s implementing [`railbook_protocols::PageDriver`].

pub mod browser;
pub mod cdp;
pub mod keys;
pub mod launcher;
pub mod locator_js;
pub mod page;

pub use launcher::{CdpLauncher, LauncherConfig};
pub use page::CdpPage;
