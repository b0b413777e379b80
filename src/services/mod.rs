//! Best-effort network services.
//!
//! This module contains the fetchers for:
//! - Page titles (`fetch_page_title`)
//! - Recent profile posts (`PostsScraper`)
//! - Short links (`LinkShortener`, `shorten_url`)
//! - Chat line link annotation (`LinkAnnotator`)
//!
//! Each fetcher has a `try_*`/trait form that returns [`crate::error::Result`]
//! and a best-effort form that logs the failure and returns an empty value.

mod links;
mod posts;
pub mod shorten;
mod title;

pub use links::LinkAnnotator;
pub use posts::{PostsScraper, extract_posts};
pub use shorten::{IsGd, LinkShortener, PastIs, shorten_url};
pub use title::{extract_title, fetch_page_title, try_fetch_page_title};
