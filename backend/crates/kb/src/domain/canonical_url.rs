//! URL canonicalisation
//!
//! Two bookmarks that differ only in tracking parameters, fragment, default
//! port, letter case of scheme/host or a trailing slash are the same entry.
//! `url::Url` already lower-cases scheme and host and drops default ports.

use url::Url;

pub const URL_MAX_LENGTH: usize = 2048;

const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUrl {
    original: String,
    canonical: String,
}

impl EntryUrl {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let original = raw.trim();

        if original.is_empty() {
            return Err("Adres URL jest wymagany".to_string());
        }
        if original.len() > URL_MAX_LENGTH {
            return Err(format!(
                "Adres URL może mieć maksymalnie {URL_MAX_LENGTH} znaków"
            ));
        }

        let url = Url::parse(original).map_err(|_| "Nieprawidłowy adres URL".to_string())?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err("Adres URL musi zaczynać się od http:// lub https://".to_string());
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err("Nieprawidłowy adres URL".to_string());
        }

        Ok(Self {
            original: original.to_string(),
            canonical: canonicalize(url),
        })
    }

    /// Rebuild from stored columns
    pub fn from_parts(original: String, canonical: String) -> Self {
        Self {
            original,
            canonical,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

fn is_tracking_param(key: &str) -> bool {
    key.to_ascii_lowercase().starts_with("utm_")
        || TRACKING_PARAMS.iter().any(|p| key.eq_ignore_ascii_case(p))
}

fn canonicalize(mut url: Url) -> String {
    url.set_fragment(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed }.to_string();
        url.set_path(&trimmed);
    }

    url.to_string()
}
