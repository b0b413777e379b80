// src/utils/url.rs

//! URL detection in free text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"'`]+"#).expect("URL pattern is valid")
});

/// Characters that usually close a sentence rather than belong to a link.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '>'];

/// Closing brackets with their opening counterparts.
const BRACKETS: &[(char, char)] = &[(')', '('), (']', '['), ('}', '{')];

/// Find http(s) URLs in a chat line, in order of appearance, without duplicates.
///
/// # Examples
/// ```
/// use backlog::utils::url::extract_urls;
///
/// assert_eq!(
///     extract_urls("see https://example.com/a, and (http://example.org)."),
///     vec!["https://example.com/a", "http://example.org"]
/// );
/// ```
pub fn extract_urls(line: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL_PATTERN
        .find_iter(line)
        .map(|m| trim_trailing(m.as_str()))
        .filter(|candidate| is_web_url(candidate))
        .filter(|candidate| seen.insert(candidate.to_string()))
        .map(str::to_string)
        .collect()
}

/// Drop sentence punctuation and unmatched closing brackets from the end.
///
/// A closing bracket is kept while the candidate holds as many opening
/// brackets of the same kind, so `.../Rust_(language)` survives intact.
fn trim_trailing(candidate: &str) -> &str {
    let mut rest = candidate;
    while let Some(last) = rest.chars().last() {
        let unmatched = BRACKETS.iter().any(|&(close, open)| {
            last == close && rest.matches(close).count() > rest.matches(open).count()
        });
        if !unmatched && !TRAILING_PUNCTUATION.contains(&last) {
            break;
        }
        rest = &rest[..rest.len() - last.len_utf8()];
    }
    rest
}

/// Whether `candidate` parses as an http(s) URL with a host.
pub fn is_web_url(candidate: &str) -> bool {
    url::Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
