use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::{Coordinates, Reading},
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues forecast requests through a single HTTP client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(FORECAST_URL, timeout)
    }

    /// Like [`Fetcher::new`] but against another forecast endpoint.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(Error::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn forecast_url(&self, coords: &Coordinates) -> String {
        format!(
            "{}?latitude={}&longitude={}&current=temperature_2m&timezone=auto",
            self.base_url, coords.latitude, coords.longitude,
        )
    }

    /// Perform the request and return the whole response body.
    pub async fn fetch(&self, coords: &Coordinates) -> Result<Vec<u8>> {
        let url = self.forecast_url(coords);
        debug!(%url, "requesting current weather");

        let mut res = self.http.get(&url).send().await.map_err(|e| self.transport_error(e))?;
        let status = res.status();

        // Content-Length is not trusted for preallocation.
        let mut body = Vec::new();
        while let Some(chunk) = res.chunk().await.map_err(|e| self.transport_error(e))? {
            body.extend_from_slice(&chunk);
        }
        debug!(%status, bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(Error::Status {
                status,
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        Ok(body)
    }

    pub async fn current_reading(&self, coords: &Coordinates) -> Result<Reading> {
        let body = self.fetch(coords).await?;
        Reading::from_json(&body)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() { Error::Timeout(self.timeout) } else { Error::Transport(err) }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
