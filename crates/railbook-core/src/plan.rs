//! Typed inputs for one booking run.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use railbook_config::Config;
use railbook_protocols::{
    ContactInfo, Credentials, Gender, JourneyError, JourneyRequest, Passenger, PaymentInfo,
    ReceiptIds, SessionConfig,
};
use thiserror::Error;

use crate::human_gate::HumanGate;
use crate::site::LocatorTable;

/// Errors turning configuration into a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid journey: {0}")]
    Journey(#[from] JourneyError),

    #[error("Invalid locator '{name}': {message}")]
    Locator { name: String, message: String },
}

/// Notification settings the orchestrator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPlan {
    pub enabled: bool,
    /// Pause between two passengers' messages.
    pub interval: Duration,
}

/// Everything a run needs, checked and typed.
#[derive(Debug, Clone)]
pub struct BookingPlan {
    pub journey: JourneyRequest,
    pub credentials: Credentials,
    pub contact: ContactInfo,
    pub payment: PaymentInfo,
    pub session: SessionConfig,
    /// Delay between typed characters.
    pub typing_delay: Duration,
    pub home_url: String,
    pub login_gate: HumanGate,
    pub payment_gate: HumanGate,
    pub locators: LocatorTable,
    /// Receipt ids pinned in configuration; read from the page when `None`.
    pub pinned_receipt: Option<ReceiptIds>,
    pub notification: NotificationPlan,
    pub output_dir: PathBuf,
    pub failure_screenshots: bool,
}

impl BookingPlan {
    /// Build a plan from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, PlanError> {
        let passengers = config
            .journey
            .passengers
            .iter()
            .map(|p| {
                let gender: Gender = p.gender.parse()?;
                Ok(Passenger::new(p.name.trim(), p.age.trim(), gender))
            })
            .collect::<Result<Vec<_>, JourneyError>>()?;

        let journey = JourneyRequest::new(
            config.journey.origin.trim(),
            config.journey.destination.trim(),
            config.journey.date.trim(),
            passengers,
        )?;

        let mut locators = LocatorTable::default();
        locators.apply_overrides(&config.site.locators)?;

        let pinned_receipt = config.receipt.as_ref().map(|r| ReceiptIds {
            transaction_id: r.transaction_id.clone(),
            reservation_id: r.reservation_id.clone(),
        });

        Ok(Self {
            journey,
            credentials: Credentials {
                username: config.credentials.username.clone(),
                password: config.credentials.password.clone(),
            },
            contact: ContactInfo {
                phone: config.contact.phone.clone(),
                address: config.contact.address.clone(),
                postal_code: config.contact.postal_code.clone(),
            },
            payment: PaymentInfo {
                card_number: config.payment.card_number.clone(),
                expiry: config.payment.expiry.clone(),
                cvv: config.payment.cvv.clone(),
                holder_name: config.payment.holder_name.clone(),
            },
            session: SessionConfig {
                headless: config.browser.headless,
                viewport_width: config.browser.viewport_width,
                viewport_height: config.browser.viewport_height,
                default_timeout: Duration::from_millis(config.browser.timeout_ms),
            },
            typing_delay: Duration::from_millis(config.browser.typing_delay_ms),
            home_url: config.site.home_url.clone(),
            login_gate: HumanGate::new("login captcha", Duration::from_secs(config.gates.login_secs)),
            payment_gate: HumanGate::new(
                "payment challenge",
                Duration::from_secs(config.gates.payment_secs),
            ),
            locators,
            pinned_receipt,
            notification: NotificationPlan {
                enabled: config.notification.enabled,
                interval: Duration::from_secs(config.notification.interval_secs),
            },
            output_dir: config.artifacts.resolved_output_dir(),
            failure_screenshots: config.artifacts.failure_screenshots,
        })
    }

    /// Human-readable summary; never includes secrets.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Journey:   {} -> {} on {}",
            self.journey.origin(),
            self.journey.destination(),
            self.journey.date()
        );
        for (i, p) in self.journey.passengers().iter().enumerate() {
            let _ = writeln!(out, "Passenger {}: {} ({}, {})", i + 1, p.name, p.age, p.gender);
        }
        let _ = writeln!(out, "Login:     {}", self.credentials.username);
        let _ = writeln!(out, "Card:      {}", self.payment.masked_card());
        let _ = writeln!(
            out,
            "Gates:     {} {}s, {} {}s",
            self.login_gate.name(),
            self.login_gate.duration().as_secs(),
            self.payment_gate.name(),
            self.payment_gate.duration().as_secs()
        );
        let _ = writeln!(
            out,
            "Receipt:   {}",
            if self.pinned_receipt.is_some() {
                "pinned in configuration"
            } else {
                "read from confirmation page"
            }
        );
        let _ = writeln!(
            out,
            "Notify:    {}",
            if self.notification.enabled { "enabled" } else { "disabled" }
        );
        let _ = write!(out, "Tickets:   {}", self.output_dir.display());
        out
    }
}

#[cfg(test)]
mod tests {
    use railbook_config::{PassengerConfig, ReceiptConfig};

    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.journey.origin = "NEW DELHI - NDLS".to_string();
        config.journey.destination = "HOWRAH JN - HWH".to_string();
        config.journey.date = "22/04/2024".to_string();
        config.journey.passengers = vec![
            PassengerConfig {
                name: "Phoolan Devi".to_string(),
                age: "45".to_string(),
                gender: "F".to_string(),
            },
            PassengerConfig {
                name: "Ghansidas Pandey".to_string(),
                age: "50".to_string(),
                gender: "m".to_string(),
            },
        ];
        config.credentials.username = "traveller".to_string();
        config.credentials.password = "hunter2".to_string();
        config.payment.card_number = "4111 1111 1111 1234".to_string();
        config
    }

    #[test]
    fn test_from_config_preserves_passenger_order() {
        let plan = BookingPlan::from_config(&config()).unwrap();
        let names: Vec<_> = plan.journey.passengers().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Phoolan Devi", "Ghansidas Pandey"]);
        assert_eq!(plan.journey.passengers()[1].gender, Gender::Male);
    }

    #[test]
    fn test_from_config_durations() {
        let mut config = config();
        config.gates.login_secs = 3;
        config.browser.timeout_ms = 2500;
        config.browser.typing_delay_ms = 40;
        let plan = BookingPlan::from_config(&config).unwrap();

        assert_eq!(plan.login_gate.duration(), Duration::from_secs(3));
        assert_eq!(plan.payment_gate.duration(), Duration::from_secs(15));
        assert_eq!(plan.session.default_timeout, Duration::from_millis(2500));
        assert_eq!(plan.typing_delay, Duration::from_millis(40));
    }

    #[test]
    fn test_from_config_bad_gender() {
        let mut config = config();
        config.journey.passengers[0].gender = "X".to_string();
        assert!(matches!(
            BookingPlan::from_config(&config),
            Err(PlanError::Journey(JourneyError::InvalidGender(_)))
        ));
    }

    #[test]
    fn test_from_config_no_passengers() {
        let mut config = config();
        config.journey.passengers.clear();
        assert!(BookingPlan::from_config(&config).is_err());
    }

    #[test]
    fn test_pinned_receipt() {
        let mut config = config();
        assert!(BookingPlan::from_config(&config).unwrap().pinned_receipt.is_none());

        config.receipt = Some(ReceiptConfig {
            transaction_id: "100004".to_string(),
            reservation_id: "5800000".to_string(),
        });
        let plan = BookingPlan::from_config(&config).unwrap();
        assert_eq!(plan.pinned_receipt.unwrap().transaction_id, "100004");
    }

    #[test]
    fn test_summary_hides_secrets() {
        let summary = BookingPlan::from_config(&config()).unwrap().summary();
        assert!(summary.contains("NEW DELHI - NDLS -> HOWRAH JN - HWH"));
        assert!(summary.contains("Passenger 2: Ghansidas Pandey (50, M)"));
        assert!(summary.contains("****1234"));
        assert!(!summary.contains("hunter2"));
        assert!(!summary.contains("4111"));
    }
}
