//! # Command execution layer
//!
//! Translates [`Effect`]s returned by [`App::update`](crate::app::App::update)
//! into [`Cmd`]s and runs them. This is the boundary where state meets I/O:
//! catalog requests, stream resolution, and the debounced search all run as
//! Tokio tasks whose results come back as [`Msg`]s.
//!
//! State updates stay pure; everything effectful lives here.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use marquee_api::{CatalogClient, EpisodeRef, StreamResolver};
use marquee_nav::{RowGrid, load_section};
use marquee_types::{MediaCard, MediaKind, Section};
use tokio::task::{JoinHandle, spawn};
use tracing::{debug, info};

use crate::app::{DetailsPayload, Effect, Msg};

/// Clients and shared state the commands need.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<CatalogClient>,
    pub streams: Arc<StreamResolver>,
    pub grid: RowGrid,
}

/// Side-effectful commands executed outside of state updates.
#[derive(Debug)]
pub enum Cmd {
    /// Fill a row from the catalog.
    LoadSection(Section),
    /// Multi search, dropped if `latest` moves past `generation` during `delay`.
    Search {
        query: String,
        generation: u64,
        latest: Arc<AtomicU64>,
        delay: Duration,
    },
    FetchDetails(MediaCard),
    FetchSeason { show_id: u64, season: u32 },
    ResolveStream {
        id: u64,
        kind: MediaKind,
        episode: Option<EpisodeRef>,
    },
    /// Hand a stream URL to the player. There is no player; the URL is logged.
    Play(String),
}

/// Results of a batch of commands.
#[derive(Default)]
pub struct CommandBatch {
    /// Background tasks that resolve to a message.
    pub pending: Vec<JoinHandle<Msg>>,
}

/// Convert application [`Effect`]s into [`Cmd`]s.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .map(|effect| match effect {
            Effect::LoadSection(section) => Cmd::LoadSection(section),
            Effect::Search {
                query,
                generation,
                latest,
                delay,
            } => Cmd::Search {
                query,
                generation,
                latest,
                delay,
            },
            Effect::FetchDetails(card) => Cmd::FetchDetails(card),
            Effect::FetchSeason { show_id, season } => Cmd::FetchSeason { show_id, season },
            Effect::ResolveStream { id, kind, episode } => Cmd::ResolveStream { id, kind, episode },
            Effect::Play(url) => Cmd::Play(url),
        })
        .collect()
}

/// Translate and execute effects in one step.
pub fn run_from_effects(services: &Services, effects: Vec<Effect>) -> CommandBatch {
    run_cmds(services, from_effects(effects))
}

/// Execute commands, spawning the asynchronous ones.
pub fn run_cmds(services: &Services, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::LoadSection(section) => {
                let catalog = Arc::clone(&services.catalog);
                let grid = services.grid.clone();
                batch.pending.push(spawn(async move {
                    let count = load_section(catalog.as_ref(), &grid, section).await;
                    Msg::SectionLoaded { section, count }
                }));
            }
            Cmd::Search {
                query,
                generation,
                latest,
                delay,
            } => {
                let catalog = Arc::clone(&services.catalog);
                batch.pending.push(spawn(async move {
                    tokio::time::sleep(delay).await;
                    if latest.load(Ordering::SeqCst) != generation {
                        return Msg::SearchSuperseded { generation };
                    }
                    debug!(%query, generation, "running search");
                    let result = catalog.search(&query).await.map_err(|error| error.to_string());
                    Msg::SearchCompleted {
                        query,
                        generation,
                        result,
                    }
                }));
            }
            Cmd::FetchDetails(card) => {
                let catalog = Arc::clone(&services.catalog);
                batch.pending.push(spawn(async move {
                    let result = tokio::try_join!(
                        catalog.details(card.id, card.kind),
                        catalog.credits(card.id, card.kind),
                        catalog.videos(card.id, card.kind),
                    )
                    .map(|(details, credits, videos)| {
                        Box::new(DetailsPayload {
                            details,
                            credits,
                            videos,
                        })
                    })
                    .map_err(|error| error.to_string());
                    Msg::DetailsLoaded { id: card.id, result }
                }));
            }
            Cmd::FetchSeason { show_id, season } => {
                let catalog = Arc::clone(&services.catalog);
                batch.pending.push(spawn(async move {
                    let result = catalog
                        .season(show_id, season)
                        .await
                        .map_err(|error| error.to_string());
                    Msg::SeasonLoaded {
                        show_id,
                        season,
                        result,
                    }
                }));
            }
            Cmd::ResolveStream { id, kind, episode } => {
                let streams = Arc::clone(&services.streams);
                batch.pending.push(spawn(async move {
                    let result = streams
                        .resolve(id, kind, episode)
                        .await
                        .map(|source| source.url)
                        .map_err(|error| error.to_string());
                    Msg::StreamResolved { id, episode, result }
                }));
            }
            Cmd::Play(url) => {
                info!(%url, "play requested");
            }
        }
    }
    batch
}
