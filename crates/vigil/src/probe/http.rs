//! HTTP and HTTPS endpoint probes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;

use super::Probe;

/// Timeout applied to HTTPS requests.
const HTTPS_TIMEOUT: Duration = Duration::from_secs(5);

/// Plain HTTP endpoint check: a GET with client defaults.
pub struct HttpProbe {
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self) -> String {
        match reqwest::get(&self.url).await {
            // Any completed request means the server answered; the status
            // code is reported as-is, non-success codes included.
            Ok(response) => format!(
                "{} is active. Response code: {}",
                self.url,
                response.status().as_u16()
            ),
            Err(_) => format!("Failed to connect to {}", self.url),
        }
    }
}

/// HTTPS endpoint check: a GET with a browser-like User-Agent and an
/// explicit timeout, classifying connect errors, timeouts, and other
/// request errors separately.
pub struct HttpsProbe {
    url: String,
    timeout: Duration,
}

impl HttpsProbe {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), timeout: HTTPS_TIMEOUT }
    }

    async fn get(&self) -> reqwest::Result<reqwest::Response> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        client.get(&self.url).header(USER_AGENT, "Mozilla/5.0").send().await
    }
}

#[async_trait]
impl Probe for HttpsProbe {
    async fn check(&self) -> String {
        match self.get().await {
            Ok(response) => format!(
                "{} is active. Server is up. Response code: {}",
                self.url,
                response.status().as_u16()
            ),
            Err(e) if e.is_connect() => {
                format!("Failed to connect to {}. Connection error", self.url)
            }
            Err(e) if e.is_timeout() => {
                format!("Failed to connect to {}. Timeout occurred", self.url)
            }
            Err(e) => {
                format!("Failed to connect to {}. Error during request: {e}", self.url)
            }
        }
    }
}
