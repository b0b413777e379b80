// src/models/mod.rs

//! Domain models for the backlog application.

mod config;
mod entry;

// Re-export all public types
pub use config::{
    BacklogConfig, Config, FetchConfig, PostsConfig, ShortenerConfig, ShortenerService,
    USER_PLACEHOLDER,
};
pub use entry::{LinkSummary, LogLine};
