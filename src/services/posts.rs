// src/services/posts.rs

//! Recent posts scraped from a public profile page.
//!
//! No API access is involved: the profile page is fetched anonymously and
//! every element matching the configured selector is taken as one post.

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::PostsConfig;
use crate::utils::http::fetch_text;

/// Scraper for the recent posts of a user.
pub struct PostsScraper {
    client: Client,
    config: PostsConfig,
    selector: Selector,
}

impl PostsScraper {
    /// Create a scraper, failing if the configured selector does not parse.
    pub fn new(client: Client, config: PostsConfig) -> Result<Self> {
        let selector = parse_selector(&config.selector)?;
        Ok(Self {
            client,
            config,
            selector,
        })
    }

    /// Profile page URL for `user`, with the identifier encoded as one path segment.
    pub fn profile_url(&self, user: &str) -> Result<String> {
        Ok(self.config.profile_url_for(&encode_path_segment(user)?))
    }

    /// Fetch the posts of `user`, propagating every failure.
    pub async fn try_fetch_recent_posts(&self, user: &str) -> Result<Vec<String>> {
        if user.trim().is_empty() {
            return Err(AppError::validation("empty user identifier"));
        }
        let url = self.profile_url(user)?;
        log::debug!("Fetching posts for {user} from {url}");
        let html = fetch_text(&self.client, &url).await?;
        Ok(extract_posts(&html, &self.selector))
    }

    /// Fetch the posts of `user`.
    ///
    /// Best-effort: any failure is logged and mapped to an empty list.
    pub async fn fetch_recent_posts(&self, user: &str) -> Vec<String> {
        self.try_fetch_recent_posts(user)
            .await
            .unwrap_or_else(|error| {
                log::warn!("Failed to fetch posts for {user}: {error}");
                Vec::new()
            })
    }
}

/// Collect the plain text of every element matching `selector`.
///
/// Embedded markup is dropped and entities are decoded. Non-breaking
/// spaces are removed, whether decoded or left behind as a literal
/// `&nbsp;` by double escaping.
pub fn extract_posts(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|element| {
            let text: String = element.text().collect();
            text.replace('\u{a0}', "").replace("&nbsp;", "")
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Percent-encode `raw` so it stays a single URL path segment.
fn encode_path_segment(raw: &str) -> Result<String> {
    let mut scratch = url::Url::parse("http://localhost/")?;
    scratch
        .path_segments_mut()
        .map_err(|()| AppError::fetch("profile_url", "base URL cannot hold a path"))?
        .clear()
        .push(raw);
    Ok(scratch.path().trim_start_matches('/').to_string())
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::*;
    use crate::models::FetchConfig;
    use crate::utils::http::create_async_client;
    use crate::utils::testing::{Reply, serve_once};

    const PROFILE: &str = r#"
        <html><body>
          <div class="tweet">
            <p class="js-tweet-text tweet-text">Hello <a href="/x">@world</a> &amp; friends</p>
          </div>
          <p class="tweet-text">not a post body</p>
          <div class="tweet">
            <p class="js-tweet-text tweet-text">it&#39;s&nbsp;here &amp;nbsp;</p>
          </div>
          <div class="tweet">
            <p class="js-tweet-text tweet-text">   </p>
          </div>
        </body></html>
    "#;

    fn scraper_for(profile_url: String) -> PostsScraper {
        let client = create_async_client(&FetchConfig::default()).unwrap();
        let config = PostsConfig {
            profile_url,
            ..PostsConfig::default()
        };
        PostsScraper::new(client, config).unwrap()
    }

    #[test]
    fn test_extract_posts_strips_markup_and_entities() {
        let selector = parse_selector(&PostsConfig::default().selector).unwrap();
        let posts = extract_posts(PROFILE, &selector);
        assert_eq!(posts, vec!["Hello @world & friends", "it'shere"]);
    }

    #[test]
    fn test_extract_posts_none_found() {
        let selector = parse_selector("p.tweet-text.js-tweet-text").unwrap();
        assert!(extract_posts("<p>nothing</p>", &selector).is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_selector() {
        let client = create_async_client(&FetchConfig::default()).unwrap();
        let config = PostsConfig {
            selector: "[[invalid".to_string(),
            ..PostsConfig::default()
        };
        assert!(matches!(
            PostsScraper::new(client, config),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn test_profile_url_encodes_user() {
        let scraper = scraper_for("https://example.com/{user}".to_string());
        assert_eq!(scraper.profile_url("rust").unwrap(), "https://example.com/rust");
        assert_eq!(scraper.profile_url("a/b").unwrap(), "https://example.com/a%2Fb");
    }

    #[test]
    fn test_profile_url_space_is_not_plus() {
        let scraper = scraper_for("https://example.com/{user}".to_string());
        assert_eq!(scraper.profile_url("a b").unwrap(), "https://example.com/a%20b");
        assert_eq!(scraper.profile_url("a+b").unwrap(), "https://example.com/a+b");
        assert_eq!(scraper.profile_url("q?x#y").unwrap(), "https://example.com/q%3Fx%23y");
    }

    #[tokio::test]
    async fn test_fetch_recent_posts() {
        let server = serve_once(Reply::html(PROFILE)).await;
        let scraper = scraper_for(server.url("/{user}"));

        let posts = scraper.fetch_recent_posts("rustlang").await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], "Hello @world & friends");

        let request = server.request().await;
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.uri.path(), "/rustlang");
    }

    #[tokio::test]
    async fn test_fetch_recent_posts_error_status_is_empty() {
        let server = serve_once(Reply::status(StatusCode::NOT_FOUND)).await;
        let scraper = scraper_for(server.url("/{user}"));

        assert!(scraper.fetch_recent_posts("ghost").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_recent_posts_empty_user() {
        let scraper = scraper_for("http://127.0.0.1:9/{user}".to_string());
        assert!(matches!(
            scraper.try_fetch_recent_posts("  ").await,
            Err(AppError::Validation(_))
        ));
        assert!(scraper.fetch_recent_posts("").await.is_empty());
    }
}
