//! railbook - scripted train-ticket booking.
//!
//! Loads one run's configuration, drives the booking site through Chrome,
//! writes a PDF ticket per passenger and optionally sends chat notifications.

mod cli;

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use railbook_config::{Config, ConfigLoader, ConfigValidator};
use railbook_core::{
    exit_status, BookingOrchestrator, BookingPlan, PdfTicketEmitter, RunOutcome, WhatsAppNotifier,
};
use railbook_driver_cdp::{CdpLauncher, LauncherConfig};
use railbook_protocols::BookingError;

use cli::{Cli, Commands};

/// Get the ~/.railbook directory path.
fn railbook_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".railbook"))
        .unwrap_or_else(|| PathBuf::from(".railbook"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.railbook/logs/ with daily rotation. The
/// returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_dir = railbook_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("railbook")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)
        .context("creating log file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer
        .with(fmt::layer().with_target(true).with_ansi(true))
        // File layer
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

/// Load the config file and validate it. Warnings are logged.
fn load_config(path: &Path) -> Result<Config> {
    let config = ConfigLoader::load(path)
        .with_context(|| format!("loading config {}", path.display()))?;

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in &warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    Ok(config)
}

fn launcher_config(config: &Config) -> LauncherConfig {
    LauncherConfig {
        debug_port: config.browser.debug_port,
        profile_dir: config.browser.resolved_profile_dir(),
        chrome_path: config.browser.chrome_path.as_ref().map(PathBuf::from),
    }
}

fn print_outcome(outcome: &RunOutcome) {
    println!("Booking complete ({} ticket record(s)).", outcome.records.len());
    if let Some(record) = outcome.records.first() {
        println!(
            "  transaction {} / reservation {}",
            record.transaction_id, record.reservation_id
        );
    }
    for path in &outcome.artifact_paths {
        println!("  ticket: {}", path.display());
    }
    for failure in &outcome.artifact_failures {
        println!("  {}: {}", failure.kind(), failure);
    }
    if outcome.notifications_enabled {
        println!(
            "  notifications: {} sent, {} failed",
            outcome.notifications_sent,
            outcome.notification_failures.len()
        );
        for failure in &outcome.notification_failures {
            println!("  {}: {}", failure.kind(), failure);
        }
    }
}

fn print_failure(err: &BookingError) {
    eprintln!("Booking failed: {}: {}", err.kind(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Execute one booking and return the process exit status.
async fn run_booking(mut config: Config, headless: bool, no_notify: bool) -> Result<i32> {
    if headless {
        config.browser.headless = true;
    }
    if no_notify {
        config.notification.enabled = false;
    }

    let plan = BookingPlan::from_config(&config)?;
    info!("Plan:\n{}", plan.summary());

    let launcher = Arc::new(CdpLauncher::new(launcher_config(&config)));
    let emitter = Arc::new(PdfTicketEmitter::new(plan.output_dir.clone()));
    let notifier = Arc::new(WhatsAppNotifier::new(
        &config.notification,
        plan.locators.chat.clone(),
        plan.typing_delay,
    ));

    let orchestrator = BookingOrchestrator::new(launcher, emitter, plan).with_notifier(notifier);
    let result = orchestrator.run().await;

    match &result {
        Ok(outcome) => print_outcome(outcome),
        Err(err) => print_failure(err),
    }

    Ok(exit_status(&result, config.run.fail_on_partial))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before tracing, so RUST_LOG may come from .env
    let env_file = dotenvy::dotenv();
    let guard = init_tracing()?;
    match env_file {
        Ok(env_path) => info!("Loaded environment from {}", env_path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring .env: {}", e),
    }

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let status = match cli.command {
        Some(Commands::Check) => {
            let plan = BookingPlan::from_config(&config)?;
            println!("{}", plan.summary());
            println!("Configuration OK.");
            0
        }
        Some(Commands::Run { headless, no_notify }) => {
            run_booking(config, headless, no_notify).await?
        }
        None => run_booking(config, false, false).await?,
    };

    drop(guard);
    std::process::exit(status);
}
