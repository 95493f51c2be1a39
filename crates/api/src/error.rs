use marquee_util::BaseUrlError;
use thiserror::Error;

/// Failures talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog API key is not set; export TMDB_API_KEY")]
    MissingApiKey,
    #[error("invalid catalog base URL: {0}")]
    BaseUrl(#[from] BaseUrlError),
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("catalog response did not parse: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures resolving a stream URL.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid stream base URL: {0}")]
    BaseUrl(#[from] BaseUrlError),
    #[error("stream request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("stream resolver returned HTTP {0}")]
    Status(u16),
    #[error("stream response did not parse: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no video sources found")]
    NoSources,
}
