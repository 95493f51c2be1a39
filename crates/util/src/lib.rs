pub mod config;
mod path_processing;

pub use config::{ConfigError, Settings};
pub use path_processing::{default_log_path, expand_tilde};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

/// Hostnames allowed to use plain HTTP.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization: )([\w\-\.=:/+]+)",
        r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET|PASSWORD)=)([^\s&]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redacts values that look like secrets in a string.
///
/// Covers `Authorization:` headers and `*KEY=`/`*TOKEN=` style pairs, which is
/// how the catalog API key appears in request URLs.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in SECRET_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

/// A base URL that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaseUrlError {
    #[error("invalid base URL '{url}': {reason}")]
    Invalid { url: String, reason: String },
    #[error("base URL '{0}' must include a host")]
    MissingHost(String),
    #[error("base URL must use https for non-localhost hosts; got '{0}://'")]
    InsecureScheme(String),
}

/// Validate that a base URL is acceptable for API use.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn validate_base_url(base: &str) -> Result<(), BaseUrlError> {
    let parsed = Url::parse(base).map_err(|e| BaseUrlError::Invalid {
        url: base.to_string(),
        reason: e.to_string(),
    })?;

    let host_name = parsed.host_str().ok_or_else(|| BaseUrlError::MissingHost(base.to_string()))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(BaseUrlError::InsecureScheme(parsed.scheme().to_string()));
    }
    Ok(())
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when
/// anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
