//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP behavior shared by every fetcher
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Profile page scraping rules
    #[serde(default)]
    pub posts: PostsConfig,

    /// Link shortening service
    #[serde(default)]
    pub shortener: ShortenerConfig,

    /// Rolling chat log settings
    #[serde(default)]
    pub backlog: BacklogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_concurrent == 0 {
            return Err(AppError::validation("fetch.max_concurrent must be > 0"));
        }
        if self.fetch.max_title_graphemes == 0 {
            return Err(AppError::validation(
                "fetch.max_title_graphemes must be > 0",
            ));
        }
        if self.backlog.capacity == 0 {
            return Err(AppError::validation("backlog.capacity must be > 0"));
        }
        if !self.posts.profile_url.contains(USER_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "posts.profile_url must contain {USER_PLACEHOLDER}"
            )));
        }
        Selector::parse(&self.posts.selector)
            .map_err(|e| AppError::selector(&self.posts.selector, format!("{e:?}")))?;
        url::Url::parse(&self.shortener.isgd_endpoint)?;
        url::Url::parse(&self.shortener.pastis_endpoint)?;
        Ok(())
    }
}

/// Placeholder replaced by the user identifier in `posts.profile_url`.
pub const USER_PLACEHOLDER: &str = "{user}";

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Maximum concurrent requests when annotating a line
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Titles longer than this many graphemes are cut
    #[serde(default = "defaults::max_title_graphemes")]
    pub max_title_graphemes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            accept_invalid_certs: false,
            max_concurrent: defaults::max_concurrent(),
            max_title_graphemes: defaults::max_title_graphemes(),
        }
    }
}

/// Where and how to scrape recent posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsConfig {
    /// Profile page URL, `{user}` is substituted
    #[serde(default = "defaults::profile_url")]
    pub profile_url: String,

    /// CSS selector matching one post body
    #[serde(default = "defaults::post_selector")]
    pub selector: String,
}

impl PostsConfig {
    /// Build the profile URL for `user`.
    pub fn profile_url_for(&self, user: &str) -> String {
        self.profile_url.replace(USER_PLACEHOLDER, user)
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            profile_url: defaults::profile_url(),
            selector: defaults::post_selector(),
        }
    }
}

/// Supported shortening services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShortenerService {
    #[default]
    Isgd,
    Pastis,
}

impl std::str::FromStr for ShortenerService {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "isgd" | "is.gd" => Ok(Self::Isgd),
            "pastis" | "past.is" => Ok(Self::Pastis),
            other => Err(AppError::config(format!("unknown shortener '{other}'"))),
        }
    }
}

/// Link shortener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    #[serde(default)]
    pub service: ShortenerService,

    #[serde(default = "defaults::isgd_endpoint")]
    pub isgd_endpoint: String,

    /// Trailing slash is required by the service
    #[serde(default = "defaults::pastis_endpoint")]
    pub pastis_endpoint: String,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            service: ShortenerService::default(),
            isgd_endpoint: defaults::isgd_endpoint(),
            pastis_endpoint: defaults::pastis_endpoint(),
        }
    }
}

/// Rolling chat log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacklogConfig {
    /// Number of recent lines kept
    #[serde(default = "defaults::capacity")]
    pub capacity: usize,
}

impl Default for BacklogConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::capacity(),
        }
    }
}

mod defaults {
    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; backlog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn max_title_graphemes() -> usize {
        120
    }

    // Posts defaults
    pub fn profile_url() -> String {
        "https://twitter.com/{user}".into()
    }
    pub fn post_selector() -> String {
        "p.js-tweet-text.tweet-text".into()
    }

    // Shortener defaults
    pub fn isgd_endpoint() -> String {
        "http://is.gd/create.php".into()
    }
    pub fn pastis_endpoint() -> String {
        "http://past.is/api/".into()
    }

    // Backlog defaults
    pub fn capacity() -> usize {
        10
    }
}
