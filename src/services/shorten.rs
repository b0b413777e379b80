// src/services/shorten.rs

//! Link shortening through third-party services.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{ShortenerConfig, ShortenerService};
use crate::utils::http::fetch_text;
use crate::utils::url::is_web_url;

/// A service that turns a long URL into a short one.
#[async_trait]
pub trait LinkShortener: Send + Sync {
    /// Service name for diagnostics.
    fn name(&self) -> &'static str;

    /// Shorten `url`, propagating every failure.
    async fn shorten(&self, url: &str) -> Result<String>;
}

/// Build the shortener selected in the configuration.
pub fn from_config(client: Client, config: &ShortenerConfig) -> Box<dyn LinkShortener> {
    match config.service {
        ShortenerService::Isgd => Box::new(IsGd::new(client, &config.isgd_endpoint)),
        ShortenerService::Pastis => Box::new(PastIs::new(client, &config.pastis_endpoint)),
    }
}

/// Shorten `url` with `shortener`.
///
/// Best-effort: any failure is logged and mapped to `None`.
pub async fn shorten_url(shortener: &dyn LinkShortener, url: &str) -> Option<String> {
    match shortener.shorten(url).await {
        Ok(short) => Some(short),
        Err(error) => {
            log::warn!("{} failed to shorten {url}: {error}", shortener.name());
            None
        }
    }
}

/// is.gd: `GET ?format=simple&url=...`, the body is the short link.
pub struct IsGd {
    client: Client,
    endpoint: String,
}

impl IsGd {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl LinkShortener for IsGd {
    fn name(&self) -> &'static str {
        "is.gd"
    }

    async fn shorten(&self, url: &str) -> Result<String> {
        let request = url::Url::parse_with_params(
            &self.endpoint,
            &[("format", "simple"), ("url", url)],
        )?;
        let body = fetch_text(&self.client, request.as_str()).await?;
        let short = body.trim();
        if !is_web_url(short) {
            return Err(AppError::fetch(self.name(), format!("unexpected reply: {short}")));
        }
        Ok(short.to_string())
    }
}

/// past.is: form `POST url=...`, JSON reply with a `shorturl` field.
pub struct PastIs {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct PastIsReply {
    shorturl: Option<String>,
}

impl PastIs {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl LinkShortener for PastIs {
    fn name(&self) -> &'static str {
        "past.is"
    }

    async fn shorten(&self, url: &str) -> Result<String> {
        let body = self
            .client
            .post(&self.endpoint)
            .form(&[("url", url)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let reply: PastIsReply = serde_json::from_str(&body)?;
        reply
            .shorturl
            .filter(|short| !short.trim().is_empty())
            .ok_or_else(|| AppError::fetch(self.name(), "reply has no shorturl"))
    }
}
