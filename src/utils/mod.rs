//! Utility functions and helpers.

pub mod http;
pub mod text;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;
