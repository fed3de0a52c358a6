//! Shared HTTP plumbing for the scraping sources.
//!
//! Every request is followed by a fixed pause. This is a self-imposed rate
//! limit, not a backoff: the pause happens whether the request succeeded or
//! not.

use std::time::Duration;

use marquee_common::{Error, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::ScrapeConfig;

/// A fetched page: the URL after redirects plus the body text.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// A `reqwest` client with a request timeout and a fixed post-request delay.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    delay: Duration,
}

impl HttpClient {
    pub fn new(settings: &ScrapeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            delay: Duration::from_millis(settings.delay_ms),
        }
    }

    /// Delay applied after each request.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// GET `url` and return the page body.
    ///
    /// 404 and 410 map to `NotFound`; any other failure (connection errors,
    /// timeouts, non-success statuses, undecodable bodies) is `Transient`.
    pub async fn get_page(&self, url: &str) -> Result<Page> {
        debug!(url = %url, "GET");
        let sent = self.client.get(url).send().await;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let resp = sent.map_err(|e| Error::transient(format!("request failed: {url}: {e}")))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(Error::not_found(url));
        }
        if !status.is_success() {
            return Err(Error::transient(format!("{url} returned HTTP {status}")));
        }

        let final_url = resp.url().to_string();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::transient(format!("failed to read body of {url}: {e}")))?;

        Ok(Page {
            url: final_url,
            body,
        })
    }

    /// GET `url` and parse the body as JSON.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let page = self.get_page(url).await?;
        serde_json::from_str(&page.body)
            .map_err(|e| Error::malformed(format!("unexpected JSON from {url}: {e}")))
    }
}

/// Minimal percent-encoding for URL path segments and query values.
pub fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";

/// Decode the handful of HTML entities that show up inside embedded JSON.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
