use std::fmt;

use async_trait::async_trait;
use marquee_nav::ItemSource;
use marquee_types::{FocusTarget, MediaCard, MediaKind, Section};
use marquee_util::{Settings, config::api_key_from_env, redact_sensitive, validate_base_url};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{CatalogEntry, Credits, MediaDetails, Page, Season, Videos};
use crate::{CatalogError, build_http_client, join_url};

/// Client for the TMDB catalog API.
///
/// Every request carries the API key as the `api_key` query parameter. URLs
/// are redacted before they reach the logs.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    image_base_url: String,
    api_key: String,
    http: Client,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let base_url = base_url.into();
        let image_base_url = image_base_url.into();
        validate_base_url(&base_url)?;
        validate_base_url(&image_base_url)?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }
        Ok(Self {
            base_url,
            image_base_url,
            api_key,
            http: build_http_client()?,
        })
    }

    /// Construct a client from settings, taking the key from `TMDB_API_KEY`.
    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        let api_key = api_key_from_env().ok_or(CatalogError::MissingApiKey)?;
        Self::new(&settings.catalog_base_url, &settings.image_base_url, api_key)
    }

    /// Absolute URL for an API-relative path, without credentials.
    pub fn endpoint_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn request(&self, path: &str, params: &[(&str, &str)]) -> RequestBuilder {
        let url = self.endpoint_url(path);
        debug!(url = %redact_sensitive(&url), ?params, "building catalog request");
        self.http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, CatalogError> {
        let response = self.request(path, params).send().await.map_err(|error| error.without_url())?;
        let status = response.status();
        let body = response.text().await.map_err(|error| error.without_url())?;
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: redact_sensitive(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn list(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<MediaCard>, CatalogError> {
        let page: Page<CatalogEntry> = self.get_json(path, params).await?;
        Ok(self.cards_from(page.results))
    }

    /// Convert list entries to cards, dropping entries that are not titles.
    pub fn cards_from(&self, entries: Vec<CatalogEntry>) -> Vec<MediaCard> {
        entries
            .into_iter()
            .filter_map(|entry| entry.into_card(&self.image_base_url))
            .collect()
    }

    pub async fn trending(&self) -> Result<Vec<MediaCard>, CatalogError> {
        self.list("/trending/all/day", &[]).await
    }

    pub async fn now_playing_movies(&self) -> Result<Vec<MediaCard>, CatalogError> {
        self.list("/movie/now_playing", &[]).await
    }

    pub async fn on_the_air_tv(&self) -> Result<Vec<MediaCard>, CatalogError> {
        self.list("/tv/on_the_air", &[]).await
    }

    /// Multi search across films and series. People are filtered out.
    pub async fn search(&self, query: &str) -> Result<Vec<MediaCard>, CatalogError> {
        self.list("/search/multi", &[("query", query)]).await
    }

    pub async fn details(&self, id: u64, kind: MediaKind) -> Result<MediaDetails, CatalogError> {
        self.get_json(&format!("/{kind}/{id}"), &[]).await
    }

    pub async fn credits(&self, id: u64, kind: MediaKind) -> Result<Credits, CatalogError> {
        self.get_json(&format!("/{kind}/{id}/credits"), &[]).await
    }

    pub async fn videos(&self, id: u64, kind: MediaKind) -> Result<Videos, CatalogError> {
        self.get_json(&format!("/{kind}/{id}/videos"), &[]).await
    }

    /// Episodes of one season of a series.
    pub async fn season(&self, show_id: u64, season_number: u32) -> Result<Season, CatalogError> {
        self.get_json(&format!("/tv/{show_id}/season/{season_number}"), &[]).await
    }
}

#[async_trait]
impl ItemSource for CatalogClient {
    async fn fetch(&self, section: Section) -> anyhow::Result<Vec<FocusTarget>> {
        let cards = match section {
            Section::Trending => self.trending().await?,
            Section::Movies => self.now_playing_movies().await?,
            Section::Tv => self.on_the_air_tv().await?,
            // Filled locally (navbar links, search results, recently opened).
            Section::Navbar | Section::Search | Section::Continue => Vec::new(),
        };
        Ok(cards.into_iter().map(FocusTarget::Card).collect())
    }
}
