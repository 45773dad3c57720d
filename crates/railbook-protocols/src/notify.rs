//! Notification dispatch trait.

use async_trait::async_trait;

use crate::driver::PageDriver;
use crate::error::NotificationError;

/// Sends one passenger's travel notification through a page session.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(
        &self,
        page: &dyn PageDriver,
        passenger_name: &str,
        origin: &str,
        destination: &str,
    ) -> Result<(), NotificationError>;
}
