//! Utility functions and helpers.

pub mod http;

/// Extract the record identifier from a ufcstats detail URL.
///
/// All three detail page families carry the identifier as the trailing
/// path segment, e.g. `http://ufcstats.com/fighter-details/d0f3959b4a9747e6`.
pub fn detail_id(url: &str) -> Option<String> {
    let pattern = regex::Regex::new(r"(?:event|fight|fighter)-details/([0-9a-fA-F]+)/?$").ok()?;
    pattern
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_lowercase())
}
