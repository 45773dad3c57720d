use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.journey.passengers.is_empty());
    assert!(config.receipt.is_none());
    assert!(!config.run.fail_on_partial);
    assert!(!config.notification.enabled);
}

#[test]
fn test_browser_config_default() {
    let browser = BrowserConfig::default();
    assert!(!browser.headless);
    assert_eq!(browser.timeout_ms, 30_000);
    assert_eq!(browser.viewport_width, 1280);
    assert_eq!(browser.viewport_height, 720);
    assert_eq!(browser.typing_delay_ms, 100);
    assert_eq!(browser.debug_port, 9222);
}

#[test]
fn test_gates_default() {
    let gates = GatesConfig::default();
    assert_eq!(gates.login_secs, 10);
    assert_eq!(gates.payment_secs, 15);
}

#[test]
fn test_notification_default() {
    let notification = NotificationConfig::default();
    assert!(!notification.enabled);
    assert_eq!(notification.interval_secs, 5);
    assert!(notification.url.starts_with("https://web.whatsapp.com"));
    assert!(notification.template.contains("{name}"));
}

#[test]
fn test_profile_dir_default() {
    let browser = BrowserConfig::default();
    assert!(browser
        .resolved_profile_dir()
        .ends_with(".railbook/browser-profile"));
}

#[test]
fn test_profile_dir_explicit() {
    let browser = BrowserConfig {
        profile_dir: Some("/tmp/railbook-profile".to_string()),
        ..Default::default()
    };
    assert_eq!(
        browser.resolved_profile_dir(),
        PathBuf::from("/tmp/railbook-profile")
    );
}

#[test]
fn test_artifacts_default() {
    let artifacts = ArtifactsConfig::default();
    assert_eq!(artifacts.resolved_output_dir(), PathBuf::from("tickets"));
    assert!(artifacts.failure_screenshots);
}

#[test]
fn test_debug_redacts_secrets() {
    let config = Config {
        credentials: CredentialsConfig {
            username: "traveller".to_string(),
            password: "hunter2".to_string(),
        },
        payment: PaymentConfig {
            card_number: "4111111111111111".to_string(),
            expiry: "12/29".to_string(),
            cvv: "987".to_string(),
            holder_name: "P DEVI".to_string(),
        },
        ..Default::default()
    };
    let debug = format!("{:?}", config);
    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("4111111111111111"));
    assert!(!debug.contains("987"));
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("irctc.co.in"));
    assert!(json.contains("30000"));
}
