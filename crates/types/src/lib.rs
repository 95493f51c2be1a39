//! Shared domain types for the Marquee workspace.
//!
//! These types are consumed by the navigator core, the catalog client, and the
//! terminal front end. They carry no behavior beyond small conversions so that
//! every crate can agree on sections, media items, and focus targets without
//! depending on each other.

mod geometry;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use geometry::BoundingBox;

/// Error returned when a textual identifier does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

/// Rows shown on the home screen, top to bottom.
///
/// The order is fixed: it is the order the navigator stacks rows in and the
/// order the indicator reports when the cursor changes rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Navbar,
    Search,
    Continue,
    Trending,
    Movies,
    Tv,
}

impl Section {
    /// Every section in top-to-bottom layout order.
    pub const ALL: [Section; 6] = [
        Section::Navbar,
        Section::Search,
        Section::Continue,
        Section::Trending,
        Section::Movies,
        Section::Tv,
    ];

    /// Stable lowercase key used in configuration and logs.
    pub const fn key(&self) -> &'static str {
        match self {
            Section::Navbar => "navbar",
            Section::Search => "search",
            Section::Continue => "continue",
            Section::Trending => "trending",
            Section::Movies => "movies",
            Section::Tv => "tv",
        }
    }

    /// Capitalized label shown in the navigation indicator.
    pub const fn title(&self) -> &'static str {
        match self {
            Section::Navbar => "Navbar",
            Section::Search => "Search",
            Section::Continue => "Continue",
            Section::Trending => "Trending",
            Section::Movies => "Movies",
            Section::Tv => "Tv",
        }
    }

    /// Heading rendered above the row.
    pub const fn heading(&self) -> &'static str {
        match self {
            Section::Navbar => "",
            Section::Search => "Search",
            Section::Continue => "Continue Watching",
            Section::Trending => "Trending Now",
            Section::Movies => "Now Playing",
            Section::Tv => "On The Air",
        }
    }

    /// Position of the section in [`Section::ALL`].
    pub fn index(&self) -> usize {
        Section::ALL.iter().position(|section| section == self).unwrap_or(0)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.key().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownValueError {
                kind: "section",
                value: value.to_string(),
            })
    }
}

/// Whether a catalog entry is a film or a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the catalog API (`/movie/{id}`, `/tv/{id}`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            _ => Err(UnknownValueError {
                kind: "media kind",
                value: value.to_string(),
            }),
        }
    }
}

/// A playable title shown as a card in a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCard {
    /// Catalog identifier, also used to resolve streams.
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    /// Absolute poster URL when the catalog provides one.
    pub poster_url: Option<String>,
    /// Release date for films, first air date for series.
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

/// Default action attached to a navbar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkAction {
    /// Jump back to the top of the home screen.
    Home,
    /// Open the search box.
    Search,
    /// Focus the films row.
    Movies,
    /// Focus the series row.
    Tv,
}

/// A navbar entry. Activating it runs its [`LinkAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub action: LinkAction,
}

impl NavLink {
    pub fn new(label: impl Into<String>, action: LinkAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// Entries of the top navigation bar, left to right.
    pub fn navbar() -> Vec<NavLink> {
        vec![
            NavLink::new("Home", LinkAction::Home),
            NavLink::new("Search", LinkAction::Search),
            NavLink::new("Movies", LinkAction::Movies),
            NavLink::new("TV Shows", LinkAction::Tv),
        ]
    }
}

/// Anything the navigator can move focus onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FocusTarget {
    Card(MediaCard),
    Link(NavLink),
}

impl FocusTarget {
    /// Text rendered inside the item.
    pub fn label(&self) -> &str {
        match self {
            FocusTarget::Card(card) => &card.title,
            FocusTarget::Link(link) => &link.label,
        }
    }
}

impl From<MediaCard> for FocusTarget {
    fn from(card: MediaCard) -> Self {
        FocusTarget::Card(card)
    }
}

impl From<NavLink> for FocusTarget {
    fn from(link: NavLink) -> Self {
        FocusTarget::Link(link)
    }
}

/// Remote-control directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Signed step along the axis the direction moves on.
    pub const fn delta(&self) -> isize {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }

    pub const fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Logical `(row, col)` position in the navigation grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_parse_case_insensitively() {
        assert_eq!("Trending".parse::<Section>(), Ok(Section::Trending));
        assert_eq!(" tv ".parse::<Section>(), Ok(Section::Tv));
        let error = "sports".parse::<Section>().unwrap_err();
        assert_eq!(error.to_string(), "unknown section 'sports'");
    }

    #[test]
    fn section_index_matches_layout_order() {
        for (index, section) in Section::ALL.iter().enumerate() {
            assert_eq!(section.index(), index);
        }
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Up.delta(), -1);
        assert_eq!(Direction::Down.delta(), 1);
        assert_eq!(Direction::Left.delta(), -1);
        assert_eq!(Direction::Right.delta(), 1);
        assert!(Direction::Up.is_vertical());
        assert!(!Direction::Right.is_vertical());
    }

    #[test]
    fn media_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Tv).expect("serialize kind");
        assert_eq!(json, "\"tv\"");
        assert_eq!("MOVIE".parse::<MediaKind>(), Ok(MediaKind::Movie));
    }

    #[test]
    fn focus_target_label_reads_inner_value() {
        let link: FocusTarget = NavLink::new("Search", LinkAction::Search).into();
        assert_eq!(link.label(), "Search");
        let card: FocusTarget = MediaCard {
            id: 7,
            kind: MediaKind::Movie,
            title: "Heat".into(),
            poster_url: None,
            release_date: None,
            vote_average: None,
        }
        .into();
        assert_eq!(card.label(), "Heat");
    }
}
