// src/services/links.rs

//! Annotate links seen in chat lines with their page title and a short link.

use futures::future;
use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::models::{Config, LinkSummary};
use crate::services::shorten::{self, LinkShortener};
use crate::services::title::fetch_page_title;
use crate::utils::text::truncate_graphemes;
use crate::utils::url::extract_urls;

/// Looks up titles and short links for every URL in a line.
pub struct LinkAnnotator {
    client: Client,
    shortener: Box<dyn LinkShortener>,
    max_concurrent: usize,
    max_title_graphemes: usize,
}

impl LinkAnnotator {
    pub fn new(
        client: Client,
        shortener: Box<dyn LinkShortener>,
        max_concurrent: usize,
        max_title_graphemes: usize,
    ) -> Self {
        Self {
            client,
            shortener,
            max_concurrent: max_concurrent.max(1),
            max_title_graphemes,
        }
    }

    /// Build an annotator using the configured shortener and limits.
    pub fn from_config(client: Client, config: &Config) -> Self {
        let shortener = shorten::from_config(client.clone(), &config.shortener);
        Self::new(
            client,
            shortener,
            config.fetch.max_concurrent,
            config.fetch.max_title_graphemes,
        )
    }

    /// Summaries for the URLs in `line`, in order of appearance.
    ///
    /// Lookups never fail; a failed lookup leaves its field empty.
    pub async fn annotate(&self, line: &str) -> Vec<LinkSummary> {
        let urls = extract_urls(line);
        if urls.is_empty() {
            return Vec::new();
        }
        log::debug!("Annotating {} link(s)", urls.len());

        stream::iter(urls)
            .map(|url| async move { self.summarize(url).await })
            .buffered(self.max_concurrent)
            .collect()
            .await
    }

    async fn summarize(&self, url: String) -> LinkSummary {
        let (title, short) = future::join(
            fetch_page_title(&self.client, &url),
            shorten::shorten_url(self.shortener.as_ref(), &url),
        )
        .await;

        LinkSummary {
            title: title.map(|t| truncate_graphemes(&t, self.max_title_graphemes)),
            short,
            url,
        }
    }
}
