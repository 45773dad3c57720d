//! Travel confirmation through the WhatsApp web client.

use std::time::Duration;

use async_trait::async_trait;
use railbook_config::NotificationConfig;
use railbook_protocols::{
    DriverError, Locator, NotificationError, Notifier, PageDriver, ReadyState,
};
use tracing::{debug, info};

use crate::site::ChatLocators;

/// Fill `{name}`, `{origin}` and `{destination}` in `template`.
///
/// Substituted values are never expanded again.
pub fn render_message(template: &str, name: &str, origin: &str, destination: &str) -> String {
    let mut out = String::with_capacity(template.len() + name.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = [("{name}", name), ("{origin}", origin), ("{destination}", destination)]
            .into_iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder));

        match value {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Sends one templated message per passenger to the chat whose display
/// name equals the passenger name.
///
/// The browser profile must already be logged in to the client.
pub struct WhatsAppNotifier {
    url: String,
    template: String,
    timeout: Duration,
    typing_delay: Duration,
    locators: ChatLocators,
}

impl WhatsAppNotifier {
    pub fn new(config: &NotificationConfig, locators: ChatLocators, typing_delay: Duration) -> Self {
        Self {
            url: config.url.clone(),
            template: config.template.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            typing_delay,
            locators,
        }
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    async fn dispatch(
        &self,
        page: &dyn PageDriver,
        passenger_name: &str,
        origin: &str,
        destination: &str,
    ) -> Result<(), NotificationError> {
        page.goto(&self.url, ReadyState::DomContentLoaded).await?;
        page.wait_visible(&self.locators.ready, Some(self.timeout))
            .await?;

        page.enter_text(&self.locators.search, passenger_name, self.typing_delay)
            .await?;

        let contact = Locator::exact_title(passenger_name);
        page.activate(&contact, Some(self.timeout))
            .await
            .map_err(|e| match e {
                DriverError::Interaction { .. } => {
                    debug!("Contact lookup failed: {}", e);
                    NotificationError::ContactNotFound(passenger_name.to_string())
                }
                other => other.into(),
            })?;

        let message = render_message(&self.template, passenger_name, origin, destination);
        page.enter_text(&self.locators.message_box, &message, self.typing_delay)
            .await?;
        page.press_key(&self.locators.message_box, "Enter").await?;

        info!("Notification sent to {}", passenger_name);
        Ok(())
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
