//! Response payloads of the catalog and stream APIs.
//!
//! Only the fields the front end reads are modelled; everything is optional or
//! defaulted because the catalog omits fields freely.

use marquee_types::{MediaCard, MediaKind};
use marquee_util::truncate_with_ellipsis;
use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
}

/// A title as it appears in list and search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    /// Present on mixed endpoints (`trending/all`, `search/multi`).
    pub media_type: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
}

impl CatalogEntry {
    /// Film or series, or `None` for entries that are neither (people).
    ///
    /// An explicit `media_type` wins; otherwise an entry with a first air date
    /// is a series.
    pub fn kind(&self) -> Option<MediaKind> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaKind::Movie),
            Some("tv") => Some(MediaKind::Tv),
            Some(_) => None,
            None if self.first_air_date.is_some() => Some(MediaKind::Tv),
            None => Some(MediaKind::Movie),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().or(self.name.as_deref()).unwrap_or("Untitled")
    }

    /// Convert to a card, resolving the poster against `image_base`.
    pub fn into_card(self, image_base: &str) -> Option<MediaCard> {
        let kind = self.kind()?;
        let title = self.display_title().to_string();
        let poster_url = poster_url(image_base, self.poster_path.as_deref());
        let release_date = match kind {
            MediaKind::Movie => self.release_date,
            MediaKind::Tv => self.first_air_date,
        };
        Some(MediaCard {
            id: self.id,
            kind,
            title,
            poster_url,
            release_date,
            vote_average: self.vote_average,
        })
    }
}

/// Absolute image URL for a catalog path like `/abc.jpg`.
pub fn poster_url(image_base: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{}{}", image_base.trim_end_matches('/'), path))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full record for a single film or series.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaDetails {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub vote_average: f64,
    pub backdrop_path: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MediaDetails {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().or(self.name.as_deref()).unwrap_or("Untitled")
    }

    /// Release line: the release date for films, the first air date and the
    /// season count for series.
    pub fn release_label(&self, kind: MediaKind) -> String {
        match kind {
            MediaKind::Movie => self.release_date.clone().unwrap_or_default(),
            MediaKind::Tv => format!(
                "{} ({} seasons)",
                self.first_air_date.as_deref().unwrap_or(""),
                self.number_of_seasons.unwrap_or(0)
            ),
        }
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

impl Credits {
    pub fn top_billed(&self, count: usize) -> impl Iterator<Item = &CastMember> {
        self.cast.iter().take(count)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Video>,
}

impl Videos {
    /// First video labelled as a trailer.
    pub fn trailer(&self) -> Option<&Video> {
        self.results.iter().find(|video| video.video_type == "Trailer")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Episode {
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub still_path: Option<String>,
}

impl Episode {
    /// Heading shown in the episode list.
    pub fn heading(&self) -> String {
        format!("Episode {}: {}", self.episode_number, self.name)
    }

    /// Overview cut to its first hundred characters.
    pub fn summary(&self) -> String {
        truncate_with_ellipsis(&self.overview, 100)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Source entry from the stream resolver.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StreamSource {
    pub url: String,
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamData {
    #[serde(default)]
    pub sources: Vec<StreamSource>,
}
