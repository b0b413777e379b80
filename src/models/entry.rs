//! Records kept in and produced for the rolling chat log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat line recorded in the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub received_at: DateTime<Utc>,
    pub text: String,
}

impl LogLine {
    /// Stamp `text` with the current time.
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            received_at: Utc::now(),
            text: text.into(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.received_at.format("%H:%M:%S"), self.text)
    }
}

/// What was learned about one link seen in a chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummary {
    pub url: String,
    pub title: Option<String>,
    pub short: Option<String>,
}

impl LinkSummary {
    /// Whether either lookup produced something worth printing.
    pub fn has_content(&self) -> bool {
        self.title.is_some() || self.short.is_some()
    }
}

impl fmt::Display for LinkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.title, &self.short) {
            (Some(title), Some(short)) => write!(f, "[{title}] {short}"),
            (Some(title), None) => write!(f, "[{title}]"),
            (None, Some(short)) => write!(f, "{short}"),
            (None, None) => write!(f, "{}", self.url),
        }
    }
}
