//! Configuration schema definitions.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Message sent to each passenger when notifications are enabled.
pub const DEFAULT_NOTIFICATION_TEMPLATE: &str =
    "Hello {name}, your train ticket from {origin} to {destination} is confirmed. Have a safe journey!";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub journey: JourneyConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub payment: PaymentConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub gates: GatesConfig,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Pinned receipt ids; when absent they are read from the confirmation page.
    #[serde(default)]
    pub receipt: Option<ReceiptConfig>,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub site: SiteConfig,
}

/// Stations, date and passengers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JourneyConfig {
    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub destination: String,

    /// Travel date in the site's format (`DD/MM/YYYY`).
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub passengers: Vec<PassengerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassengerConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub age: String,

    /// `M` or `F`.
    #[serde(default)]
    pub gender: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub postal_code: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(default)]
    pub card_number: String,

    #[serde(default)]
    pub expiry: String,

    #[serde(default)]
    pub cvv: String,

    #[serde(default)]
    pub holder_name: String,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("card_number", &"***")
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

/// Browser session tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub headless: bool,

    /// Default per-operation wait.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Pause between typed characters. The booking site's field validation
    /// only fires reliably on paced keystrokes.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Chrome profile directory; keeps logins between runs.
    #[serde(default)]
    pub profile_dir: Option<String>,

    /// Explicit Chrome binary; detected when unset.
    #[serde(default)]
    pub chrome_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            timeout_ms: default_timeout_ms(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            typing_delay_ms: default_typing_delay_ms(),
            debug_port: default_debug_port(),
            profile_dir: None,
            chrome_path: None,
        }
    }
}

impl BrowserConfig {
    /// Profile directory with `~` expanded, defaulting to
    /// `~/.railbook/browser-profile`.
    pub fn resolved_profile_dir(&self) -> PathBuf {
        match &self.profile_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).to_string()),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".railbook")
                .join("browser-profile"),
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

fn default_typing_delay_ms() -> u64 {
    100
}

fn default_debug_port() -> u16 {
    9222
}

/// Durations of the two manual checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatesConfig {
    /// Time to solve the login captcha before sign-in is clicked.
    #[serde(default = "default_login_secs")]
    pub login_secs: u64,

    /// Time to complete the payment challenge before pay is clicked.
    #[serde(default = "default_payment_secs")]
    pub payment_secs: u64,
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            login_secs: default_login_secs(),
            payment_secs: default_payment_secs(),
        }
    }
}

fn default_login_secs() -> u64 {
    10
}

fn default_payment_secs() -> u64 {
    15
}

/// Chat notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Wait for the messaging app to become ready.
    #[serde(default = "default_notification_timeout_ms")]
    pub timeout_ms: u64,

    /// Pause between two passengers' messages.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_notification_url")]
    pub url: String,

    /// Supports `{name}`, `{origin}` and `{destination}`.
    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: default_notification_timeout_ms(),
            interval_secs: default_interval_secs(),
            url: default_notification_url(),
            template: default_template(),
        }
    }
}

fn default_notification_timeout_ms() -> u64 {
    60_000
}

fn default_interval_secs() -> u64 {
    5
}

fn default_notification_url() -> String {
    "https://web.whatsapp.com/".to_string()
}

fn default_template() -> String {
    DEFAULT_NOTIFICATION_TEMPLATE.to_string()
}

/// Where tickets and diagnostics are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Save a screenshot of the page when a form step fails.
    #[serde(default = "default_true")]
    pub failure_screenshots: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            failure_screenshots: true,
        }
    }
}

impl ArtifactsConfig {
    pub fn resolved_output_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_dir).to_string())
    }
}

fn default_output_dir() -> String {
    "tickets".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptConfig {
    pub transaction_id: String,
    pub reservation_id: String,
}

/// Process-level policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Exit with status 2 when some tickets or notifications failed.
    #[serde(default)]
    pub fail_on_partial: bool,
}

/// Target site address and locator overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_home_url")]
    pub home_url: String,

    /// Locator overrides by slot name (`css=...`, `xpath=...`, or bare CSS).
    #[serde(default)]
    pub locators: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            locators: HashMap::new(),
        }
    }
}

fn default_home_url() -> String {
    "https://www.irctc.co.in/nget/train-search".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
