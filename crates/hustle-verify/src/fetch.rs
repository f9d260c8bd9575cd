use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::ChromeCapabilities;
use thirtyfour::prelude::*;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("browser session failed: {0}")]
    Browser(String),

    #[error("page did not finish loading within {0:?}")]
    Timeout(Duration),
}

impl From<WebDriverError> for FetchError {
    fn from(e: WebDriverError) -> Self {
        FetchError::Browser(e.to_string())
    }
}

/// Source of fully rendered page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError>;
}

/// Accept only absolute http(s) URLs. A bare domain gets `https://`.
pub fn parse_target(raw: &str) -> Result<Url, FetchError> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(FetchError::InvalidUrl(raw.to_string())),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Headless Chrome driven over WebDriver (chromedriver).
pub struct WebDriverFetcher {
    webdriver_url: String,
    timeout: Duration,
    settle: Duration,
}

impl WebDriverFetcher {
    const SETTLE: Duration = Duration::from_secs(2);

    pub fn new(webdriver_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            timeout,
            settle: Self::SETTLE,
        }
    }

    fn capabilities() -> WebDriverResult<ChromeCapabilities> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_chrome_option(
            "args",
            vec![
                "--headless=new",
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--window-size=1920,1080",
            ],
        )?;
        Ok(caps)
    }

    async fn render(&self, driver: &WebDriver, url: &Url) -> WebDriverResult<String> {
        driver.goto(url.as_str()).await?;
        driver.query(By::Tag("body")).first().await?;
        // let client-side scripts finish injecting markup
        tokio::time::sleep(self.settle).await;
        driver.source().await
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        debug!("Fetching {} through {}", url, self.webdriver_url);

        // one deadline covers the session handshake and the render
        let deadline = tokio::time::Instant::now() + self.timeout;
        let session = WebDriver::new(self.webdriver_url.as_str(), Self::capabilities()?);
        let driver = tokio::time::timeout_at(deadline, session)
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;

        let result = tokio::time::timeout_at(deadline, self.render(&driver, url)).await;

        // the browser is closed on every path, including timeouts
        if let Err(e) = driver.quit().await {
            warn!("Failed to quit browser session: {}", e);
        }

        match result {
            Ok(html) => Ok(html?),
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}
