//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Most passengers the booking form accepts on one ticket.
const MAX_PASSENGERS: usize = 6;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn collected errors into a single [`ConfigError::Invalid`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ConfigError::Invalid(
                self.errors
                    .iter()
                    .map(|e| format!("{}: {}", e.path, e.message))
                    .collect(),
            ))
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_journey(config, &mut result);
        Self::validate_records(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_gates(config, &mut result);
        Self::validate_notification(config, &mut result);
        Self::validate_receipt(config, &mut result);
        Self::validate_site(config, &mut result);

        result
    }

    fn require(result: &mut ValidationResult, path: &str, value: &str) {
        if value.trim().is_empty() {
            result.add_error(ValidationError::new(path, "is required"));
        }
    }

    fn validate_journey(config: &Config, result: &mut ValidationResult) {
        let journey = &config.journey;
        Self::require(result, "journey.origin", &journey.origin);
        Self::require(result, "journey.destination", &journey.destination);
        Self::require(result, "journey.date", &journey.date);

        if !journey.origin.is_empty() && journey.origin == journey.destination {
            result.add_error(ValidationError::new(
                "journey.destination",
                "Destination must differ from origin",
            ));
        }

        if journey.passengers.is_empty() {
            result.add_error(ValidationError::new(
                "journey.passengers",
                "At least one passenger is required",
            ));
        }

        if journey.passengers.len() > MAX_PASSENGERS {
            result.add_warning(ValidationWarning::new(
                "journey.passengers",
                format!(
                    "{} passengers listed; the booking form accepts at most {}",
                    journey.passengers.len(),
                    MAX_PASSENGERS
                ),
            ));
        }

        for (i, passenger) in journey.passengers.iter().enumerate() {
            let path = format!("journey.passengers[{}]", i);
            Self::require(result, &format!("{}.name", path), &passenger.name);

            match passenger.age.trim().parse::<u8>() {
                Ok(age) if (1..=125).contains(&age) => {}
                _ => result.add_error(ValidationError::new(
                    format!("{}.age", path),
                    format!("'{}' is not an age between 1 and 125", passenger.age),
                )),
            }

            if !matches!(passenger.gender.trim(), "M" | "F" | "m" | "f") {
                result.add_error(ValidationError::new(
                    format!("{}.gender", path),
                    format!("'{}' is not one of M, F", passenger.gender),
                ));
            }
        }
    }

    fn validate_records(config: &Config, result: &mut ValidationResult) {
        Self::require(result, "credentials.username", &config.credentials.username);
        Self::require(result, "credentials.password", &config.credentials.password);

        Self::require(result, "contact.phone", &config.contact.phone);
        Self::require(result, "contact.address", &config.contact.address);
        Self::require(result, "contact.postal_code", &config.contact.postal_code);

        Self::require(result, "payment.card_number", &config.payment.card_number);
        Self::require(result, "payment.expiry", &config.payment.expiry);
        Self::require(result, "payment.cvv", &config.payment.cvv);
        Self::require(result, "payment.holder_name", &config.payment.holder_name);
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;
        if browser.timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.timeout_ms",
                "timeout_ms must be greater than 0",
            ));
        }

        if browser.viewport_width == 0 || browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }

        if browser.typing_delay_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "browser.typing_delay_ms",
                "Unpaced typing may skip the site's field validation",
            ));
        }
    }

    fn validate_gates(config: &Config, result: &mut ValidationResult) {
        let gates = &config.gates;
        if gates.login_secs == 0 {
            result.add_warning(ValidationWarning::new(
                "gates.login_secs",
                "No time is left to solve the login captcha",
            ));
        }
        if gates.payment_secs == 0 {
            result.add_warning(ValidationWarning::new(
                "gates.payment_secs",
                "No time is left to complete the payment challenge",
            ));
        }

        if config.browser.headless && (gates.login_secs > 0 || gates.payment_secs > 0) {
            result.add_warning(ValidationWarning::new(
                "browser.headless",
                "Manual checkpoints cannot be completed in a headless browser",
            ));
        }
    }

    fn validate_notification(config: &Config, result: &mut ValidationResult) {
        let notification = &config.notification;
        if !notification.enabled {
            return;
        }

        if notification.timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "notification.timeout_ms",
                "timeout_ms must be greater than 0",
            ));
        }

        if !notification.url.starts_with("http://") && !notification.url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "notification.url",
                "url must start with http:// or https://",
            ));
        }

        if notification.template.trim().is_empty() {
            result.add_error(ValidationError::new(
                "notification.template",
                "template cannot be empty",
            ));
        }

        if notification.interval_secs == 0 {
            result.add_warning(ValidationWarning::new(
                "notification.interval_secs",
                "Back-to-back messages may be throttled by the messaging service",
            ));
        }
    }

    fn validate_receipt(config: &Config, result: &mut ValidationResult) {
        if let Some(receipt) = &config.receipt {
            Self::require(result, "receipt.transaction_id", &receipt.transaction_id);
            Self::require(result, "receipt.reservation_id", &receipt.reservation_id);
            result.add_warning(ValidationWarning::new(
                "receipt",
                "Receipt ids are pinned in configuration and will not be read from the site",
            ));
        }
    }

    fn validate_site(config: &Config, result: &mut ValidationResult) {
        let url = &config.site.home_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "site.home_url",
                "home_url must start with http:// or https://",
            ));
        }

        for (name, locator) in &config.site.locators {
            if locator.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("site.locators.{}", name),
                    "Locator cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
