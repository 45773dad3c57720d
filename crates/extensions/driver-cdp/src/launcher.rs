//! Starting Chrome and opening the first page.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use railbook_protocols::{BrowserLauncher, DriverError, PageDriver, SessionConfig};
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::browser::BrowserHandle;
use crate::cdp::{CdpClient, CdpError};
use crate::page::CdpPage;

/// How long to wait for a freshly launched Chrome to answer.
const STARTUP_ATTEMPTS: u32 = 30;
const STARTUP_POLL: Duration = Duration::from_millis(200);

/// Where and how Chrome is started.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Profile directory; keeps cookies between runs.
    pub profile_dir: PathBuf,
    /// Explicit browser binary; searched for when unset.
    pub chrome_path: Option<PathBuf>,
}

impl LauncherConfig {
    /// HTTP endpoint for the debug port.
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.debug_port)
    }
}

/// [`BrowserLauncher`] backed by a local Chrome over CDP.
///
/// Reuses a Chrome already listening on the debug port; otherwise launches
/// one and owns its lifetime.
pub struct CdpLauncher {
    config: LauncherConfig,
}

impl CdpLauncher {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Command-line flags for a launched Chrome.
    pub(crate) fn chrome_args(&self, headless: bool) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port),
            format!("--user-data-dir={}", self.config.profile_dir.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];
        if headless {
            args.push("--headless=new".to_string());
        }
        args
    }

    async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    fn launch_chrome(&self, headless: bool) -> Result<Child, CdpError> {
        let chrome_path = self
            .config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(CdpError::ChromeNotFound)?;

        if let Err(e) = std::fs::create_dir_all(&self.config.profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching Chrome with profile at: {}",
            self.config.profile_dir.display()
        );

        let child = Command::new(&chrome_path)
            .args(self.chrome_args(headless))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CdpError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    async fn wait_until_running(&self) -> Result<(), CdpError> {
        for _ in 0..STARTUP_ATTEMPTS {
            tokio::time::sleep(STARTUP_POLL).await;
            if self.is_chrome_running().await {
                return Ok(());
            }
        }
        Err(CdpError::LaunchFailed(
            "Chrome failed to start within timeout".to_string(),
        ))
    }

    async fn start(&self, config: &SessionConfig) -> Result<CdpPage, CdpError> {
        let chrome = if self.is_chrome_running().await {
            info!("Chrome already running on port {}", self.config.debug_port);
            None
        } else {
            info!(
                "Chrome not running on port {}, launching...",
                self.config.debug_port
            );
            let mut child = self.launch_chrome(config.headless)?;
            if let Err(e) = self.wait_until_running().await {
                let _ = child.kill().await;
                return Err(e);
            }
            Some(child)
        };

        let client = match CdpClient::connect(&self.config.endpoint(), config.default_timeout).await {
            Ok(client) => client,
            Err(e) => {
                if let Some(mut child) = chrome {
                    let _ = child.kill().await;
                }
                return Err(e);
            }
        };
        let browser = Arc::new(BrowserHandle::new(client, chrome));

        let opened = async {
            let session = browser.client.new_page(Some("about:blank")).await?;
            session
                .set_viewport(config.viewport_width, config.viewport_height)
                .await?;
            Ok::<_, CdpError>(session)
        }
        .await;

        match opened {
            Ok(session) => {
                info!("Connected to Chrome at {}", self.config.endpoint());
                Ok(CdpPage::new(
                    browser,
                    session,
                    config.default_timeout,
                    config.viewport_width,
                    config.viewport_height,
                    true,
                ))
            }
            Err(e) => {
                browser.shutdown().await;
                Err(CdpError::ConnectionFailed(format!("opening first page: {}", e)))
            }
        }
    }
}

#[async_trait]
impl BrowserLauncher for CdpLauncher {
    async fn open(&self, config: &SessionConfig) -> Result<Box<dyn PageDriver>, DriverError> {
        let page = self.start(config).await?;
        Ok(Box::new(page))
    }
}
