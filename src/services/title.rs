// src/services/title.rs

//! Page title lookup.

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::utils::http::fetch_text;
use crate::utils::text::normalize_whitespace;

/// Extract the text of the first `<title>` element.
///
/// Returns `None` when the document has no title or the title is blank.
pub fn extract_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);
    let raw: String = document.select(&selector).next()?.text().collect();
    let title = normalize_whitespace(&raw);
    (!title.is_empty()).then_some(title)
}

/// Fetch `url` and return its title, propagating every failure.
pub async fn try_fetch_page_title(client: &Client, url: &str) -> Result<String> {
    let body = fetch_text(client, url).await?;
    extract_title(&body).ok_or_else(|| AppError::fetch(url, "no <title> element"))
}

/// Fetch `url` and return its title.
///
/// Best-effort: any failure is logged and mapped to `None`.
pub async fn fetch_page_title(client: &Client, url: &str) -> Option<String> {
    match try_fetch_page_title(client, url).await {
        Ok(title) => Some(title),
        Err(error) => {
            log::warn!("{error} ({url})");
            None
        }
    }
}
