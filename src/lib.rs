// src/lib.rs

//! backlog library: a bounded most-recent-first buffer plus best-effort
//! fetchers for page titles, profile posts and short links.

pub mod buffer;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use buffer::RecencyBuffer;
pub use error::{AppError, Result};
