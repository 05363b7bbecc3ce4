//! Vault links: the user's bookmark list, grouped by free-form category.

#[cfg(test)]
#[path = "vault_test.rs"]
mod vault_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RecordError;

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaultLink {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Normalize user-entered link text into an absolute http(s) URL.
///
/// A missing scheme defaults to `https://`.
///
/// # Errors
///
/// Returns [`RecordError::EmptyUrl`] for blank input and
/// [`RecordError::InvalidUrl`] for anything that does not parse as an
/// http(s) URL with a host.
pub fn normalize_url(raw: &str) -> Result<Url, RecordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyUrl);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(RecordError::InvalidUrl(trimmed.to_owned()));
    }

    let invalid = || RecordError::InvalidUrl(trimmed.to_owned());
    let url = if trimmed.contains("://") {
        Url::parse(trimmed).map_err(|_| invalid())?
    } else {
        match Url::parse(trimmed) {
            // `mailto:x`, `javascript:x`, `http:host` and friends already carry a scheme.
            Ok(parsed) if !is_host_port(trimmed) => parsed,
            _ => Url::parse(&format!("https://{trimmed}")).map_err(|_| invalid())?,
        }
    };
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid());
    }
    Ok(url)
}

/// `localhost:3000` or `example.com:8080/path`: a host followed by a numeric
/// port, which `Url::parse` would otherwise read as a scheme.
fn is_host_port(text: &str) -> bool {
    let Some((_, rest)) = text.split_once(':') else {
        return false;
    };
    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
}

impl VaultLink {
    /// Build a link from form input. A blank title falls back to the host and
    /// a blank category to [`DEFAULT_CATEGORY`].
    ///
    /// # Errors
    ///
    /// Propagates [`normalize_url`] failures.
    pub fn new(title: &str, url: &str, category: &str, now: DateTime<Utc>) -> Result<Self, RecordError> {
        let url = normalize_url(url)?;
        let title = match title.trim() {
            "" => url
                .host_str()
                .map(|h| h.trim_start_matches("www.").to_owned())
                .unwrap_or_default(),
            t => t.to_owned(),
        };
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY.to_owned(),
            c => c.to_owned(),
        };
        Ok(Self { id: crate::new_id(), title, url: url.to_string(), category, created_at: now })
    }
}

/// Distinct categories, sorted case-insensitively.
#[must_use]
pub fn categories(links: &[VaultLink]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for link in links {
        if !out.iter().any(|c| c.eq_ignore_ascii_case(&link.category)) {
            out.push(link.category.clone());
        }
    }
    out.sort_by_key(|c| c.to_lowercase());
    out
}

/// Links in `category` (all when `None`) whose title or URL contains `query`,
/// ignoring case.
#[must_use]
pub fn filter_links<'a>(links: &'a [VaultLink], category: Option<&str>, query: &str) -> Vec<&'a VaultLink> {
    let needle = query.trim().to_lowercase();
    links
        .iter()
        .filter(|l| category.is_none_or(|c| l.category.eq_ignore_ascii_case(c)))
        .filter(|l| {
            needle.is_empty() || l.title.to_lowercase().contains(&needle) || l.url.to_lowercase().contains(&needle)
        })
        .collect()
}
