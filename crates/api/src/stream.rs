use marquee_types::MediaKind;
use marquee_util::{Settings, redact_sensitive, validate_base_url};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{StreamData, StreamSource};
use crate::{StreamError, build_http_client, join_url};

/// Season and episode of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRef {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeRef {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

/// Resolves the playable URL of a title through a vidsrc-compatible service.
#[derive(Debug, Clone)]
pub struct StreamResolver {
    base_url: String,
    http: Client,
}

impl StreamResolver {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StreamError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        Ok(Self {
            base_url,
            http: build_http_client()?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, StreamError> {
        Self::new(&settings.stream_base_url)
    }

    /// Resolver URL for a title. Episode coordinates only apply to series.
    pub fn stream_url(&self, id: u64, kind: MediaKind, episode: Option<EpisodeRef>) -> String {
        let url = join_url(&self.base_url, &format!("/vidsrc/{id}"));
        match (kind, episode) {
            (MediaKind::Tv, Some(EpisodeRef { season, episode })) => format!("{url}?s={season}&e={episode}"),
            _ => url,
        }
    }

    /// Fetch the first playable source for a title or episode.
    pub async fn resolve(
        &self,
        id: u64,
        kind: MediaKind,
        episode: Option<EpisodeRef>,
    ) -> Result<StreamSource, StreamError> {
        let url = self.stream_url(id, kind, episode);
        debug!(url = %redact_sensitive(&url), "resolving stream");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(id, status = status.as_u16(), "stream resolver rejected request");
            return Err(StreamError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let data: StreamData = serde_json::from_str(&body)?;
        first_source(data)
    }
}

fn first_source(data: StreamData) -> Result<StreamSource, StreamError> {
    data.sources
        .into_iter()
        .find(|source| !source.url.trim().is_empty())
        .ok_or(StreamError::NoSources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StreamResolver {
        StreamResolver::new("https://streams.example.com/").expect("resolver")
    }

    #[test]
    fn movie_url_ignores_episode() {
        let url = resolver().stream_url(603, MediaKind::Movie, Some(EpisodeRef::new(1, 2)));
        assert_eq!(url, "https://streams.example.com/vidsrc/603");
    }

    #[test]
    fn series_url_carries_season_and_episode() {
        let url = resolver().stream_url(1399, MediaKind::Tv, Some(EpisodeRef::new(3, 9)));
        assert_eq!(url, "https://streams.example.com/vidsrc/1399?s=3&e=9");
    }

    #[test]
    fn series_without_episode_uses_plain_url() {
        let url = resolver().stream_url(1399, MediaKind::Tv, None);
        assert_eq!(url, "https://streams.example.com/vidsrc/1399");
    }

    #[test]
    fn empty_source_list_is_an_error() {
        let data: StreamData = serde_json::from_str(r#"{"sources": []}"#).expect("data");
        assert!(matches!(first_source(data), Err(StreamError::NoSources)));

        let blank: StreamData = serde_json::from_str(r#"{"sources": [{"url": " "}]}"#).expect("data");
        assert!(matches!(first_source(blank), Err(StreamError::NoSources)));
    }

    #[test]
    fn first_usable_source_wins() {
        let data: StreamData = serde_json::from_str(
            r#"{"sources": [{"url": ""}, {"url": "https://cdn.example.com/a.m3u8", "quality": "1080p"}]}"#,
        )
        .expect("data");
        let source = first_source(data).expect("source");
        assert_eq!(source.url, "https://cdn.example.com/a.m3u8");
        assert_eq!(source.quality.as_deref(), Some("1080p"));
    }

    #[test]
    fn rejects_plain_http_remote() {
        assert!(matches!(
            StreamResolver::new("http://streams.example.com"),
            Err(StreamError::BaseUrl(_))
        ));
    }
}
