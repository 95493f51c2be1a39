//! Catalog and stream API clients.
//!
//! This crate talks to the two third-party services the front end needs:
//!
//! - the TMDB catalog, for rows of titles, search, and per-title details
//!   ([`CatalogClient`])
//! - a vidsrc-compatible resolver, for the playable URL of a title or episode
//!   ([`StreamResolver`])
//!
//! Both clients wrap a configured `reqwest::Client` with a consistent
//! User-Agent, a request timeout, and a validated base URL.
//!
//! # Example
//!
//! ```ignore
//! use marquee_api::CatalogClient;
//! use marquee_util::Settings;
//!
//! async fn demo() -> anyhow::Result<()> {
//!     let client = CatalogClient::from_settings(&Settings::default())?;
//!     for card in client.trending().await? {
//!         println!("{} ({})", card.title, card.kind);
//!     }
//!     Ok(())
//! }
//! ```

mod catalog;
mod error;
pub mod models;
mod stream;

use std::env;
use std::time::Duration;

use reqwest::{Client, header};

pub use catalog::CatalogClient;
pub use error::{CatalogError, StreamError};
pub use stream::{EpisodeRef, StreamResolver};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn user_agent() -> String {
    format!("marquee/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS)
}

/// Build the shared HTTP client used by both API clients.
fn build_http_client() -> reqwest::Result<Client> {
    let mut default_headers = header::HeaderMap::new();
    default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(default_headers)
        .user_agent(user_agent())
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Join a base URL and an API-relative path without doubling slashes.
fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("https://a.test/3/", "/movie/1"), "https://a.test/3/movie/1");
        assert_eq!(join_url("https://a.test/3", "tv/2"), "https://a.test/3/tv/2");
    }
}
