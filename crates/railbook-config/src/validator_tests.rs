use super::*;
use crate::schema::{PassengerConfig, ReceiptConfig};

fn valid_config() -> Config {
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
            gender: "M".to_string(),
        },
    ];
    config.credentials.username = "traveller".to_string();
    config.credentials.password = "secret".to_string();
    config.contact.phone = "9876543210".to_string();
    config.contact.address = "12 Station Road".to_string();
    config.contact.postal_code = "110001".to_string();
    config.payment.card_number = "4111111111111111".to_string();
    config.payment.expiry = "12/29".to_string();
    config.payment.cvv = "123".to_string();
    config.payment.holder_name = "P DEVI".to_string();
    config
}

#[test]
fn test_validate_complete_config() {
    let result = ConfigValidator::validate(&valid_config());
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_validate_default_config_reports_required_fields() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(!result.is_valid());
    for path in [
        "journey.origin",
        "journey.passengers",
        "credentials.password",
        "contact.phone",
        "payment.cvv",
    ] {
        assert!(
            result.errors.iter().any(|e| e.path == path),
            "missing error for {}",
            path
        );
    }
}

#[test]
fn test_validate_passenger_fields() {
    let mut config = valid_config();
    config.journey.passengers[1].age = "fifty".to_string();
    config.journey.passengers[1].gender = "X".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "journey.passengers[1].age"));
    assert!(result.errors.iter().any(|e| e.path == "journey.passengers[1].gender"));
    assert!(!result.errors.iter().any(|e| e.path.starts_with("journey.passengers[0]")));
}

#[test]
fn test_validate_same_origin_destination() {
    let mut config = valid_config();
    config.journey.destination = config.journey.origin.clone();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "journey.destination"));
}

#[test]
fn test_validate_too_many_passengers_warns() {
    let mut config = valid_config();
    let extra = config.journey.passengers[0].clone();
    config.journey.passengers.extend(std::iter::repeat_n(extra, 5));

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "journey.passengers"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = valid_config();
    config.browser.timeout_ms = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.timeout_ms"));
}

#[test]
fn test_validate_headless_with_gates_warns() {
    let mut config = valid_config();
    config.browser.headless = true;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "browser.headless"));
}

#[test]
fn test_validate_notification_only_when_enabled() {
    let mut config = valid_config();
    config.notification.url = "web.whatsapp.com".to_string();
    assert!(ConfigValidator::validate(&config).is_valid());

    config.notification.enabled = true;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "notification.url"));
}

#[test]
fn test_validate_pinned_receipt() {
    let mut config = valid_config();
    config.receipt = Some(ReceiptConfig {
        transaction_id: "100004".to_string(),
        reservation_id: String::new(),
    });
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "receipt.reservation_id"));
    assert!(result.warnings.iter().any(|w| w.path == "receipt"));
}

#[test]
fn test_validate_empty_locator_override() {
    let mut config = valid_config();
    config
        .site
        .locators
        .insert("search_button".to_string(), "  ".to_string());
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "site.locators.search_button"));
}

#[test]
fn test_into_result() {
    let warnings = ConfigValidator::validate(&valid_config()).into_result().unwrap();
    assert!(warnings.is_empty());

    let err = ConfigValidator::validate(&Config::default()).into_result().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msgs) if !msgs.is_empty()));
}

#[test]
fn test_validation_result_default() {
    let result = ValidationResult::default();
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}
