use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use thirtyfour::{DesiredCapabilities, WebDriver};
use tokio::process::{Child, Command};

use crate::configuration::WebdriverSettings;

const CONNECT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// One exclusively owned browser session, backed by a geckodriver server
/// spawned from the bundled per-OS binary. The whole run shares this session;
/// a failed acquisition is fatal.
pub struct Droid {
    pub driver: WebDriver,
    server: Child,
}

impl Droid {
    pub async fn new(settings: &WebdriverSettings) -> anyhow::Result<Self> {
        let executable = driver_executable(Path::new(&settings.driver_dir))?;
        log::info!("Launching webdriver server {}", executable.display());

        // kill_on_drop reaps the server even if the run panics before quit.
        let server = Command::new(&executable)
            .arg("--port")
            .arg(settings.port.to_string())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!("Failed to launch webdriver server {}", executable.display())
            })?;

        let mut caps = DesiredCapabilities::firefox();
        if settings.headless {
            caps.set_headless()?;
        }

        let url = settings.server_url();
        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(settings.startup_timeout_secs);
        let driver = loop {
            match WebDriver::new(url.as_str(), caps.clone()).await {
                Ok(driver) => break driver,
                Err(_) if tokio::time::Instant::now() < deadline => {
                    tokio::time::sleep(CONNECT_POLL_INTERVAL).await;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to acquire a webdriver session at {}", url)
                    });
                }
            }
        };
        driver.maximize_window().await?;

        Ok(Droid { driver, server })
    }

    /// Close the browser session and stop the webdriver server.
    pub async fn quit(mut self) -> anyhow::Result<()> {
        self.driver
            .quit()
            .await
            .context("Failed to close the webdriver session")?;
        self.server
            .kill()
            .await
            .context("Failed to stop the webdriver server")?;

        Ok(())
    }
}

fn driver_executable(dir: &Path) -> anyhow::Result<PathBuf> {
    match driver_executable_name(std::env::consts::OS) {
        Some(name) => Ok(dir.join(name)),
        None => bail!("No bundled geckodriver for host OS {}", std::env::consts::OS),
    }
}

/// The bundled geckodriver binary shipped for each supported host OS.
fn driver_executable_name(os: &str) -> Option<&'static str> {
    match os {
        "linux" => Some("geckodriver_linux"),
        "macos" => Some("geckodriver_mac"),
        "windows" => Some("geckodriver.exe"),
        _ => None,
    }
}
