use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marquee_api::{CatalogClient, EpisodeRef, StreamResolver};
use marquee_types::{MediaKind, Section};
use marquee_util::{Settings, default_log_path};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Browse films and series with the arrow keys.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Milliseconds input stays blocked after each key press.
    #[arg(long, global = true, value_name = "MS")]
    guard_delay_ms: Option<u64>,

    /// Row the cursor starts on (navbar, search, continue, trending, movies, tv).
    #[arg(long, global = true, value_name = "SECTION")]
    start_section: Option<Section>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the playable stream URL of a title.
    Stream {
        /// Catalog id of the title.
        id: u64,
        /// Treat the id as a series.
        #[arg(long)]
        tv: bool,
        #[arg(long, requires = "tv", default_value_t = 1)]
        season: u32,
        #[arg(long, requires = "tv", default_value_t = 1)]
        episode: u32,
    },
    /// Print titles matching a query.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

impl Cli {
    /// Read settings, apply command-line overrides on top, then validate.
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref()).context("failed to load settings")?;
        if let Some(delay) = self.guard_delay_ms {
            settings.guard_delay_ms = delay;
        }
        if let Some(section) = self.start_section {
            settings.start_section = section;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.command.is_none();
    init_tracing(interactive)?;

    let settings = cli.settings()?;
    debug!(?settings, "settings resolved");

    match cli.command {
        None => {
            let catalog = CatalogClient::from_settings(&settings)?;
            let streams = StreamResolver::from_settings(&settings)?;
            marquee_tui::run(settings, catalog, streams).await
        }
        Some(Command::Stream {
            id,
            tv,
            season,
            episode,
        }) => {
            let streams = StreamResolver::from_settings(&settings)?;
            let (kind, episode) = if tv {
                (MediaKind::Tv, Some(EpisodeRef::new(season, episode)))
            } else {
                (MediaKind::Movie, None)
            };
            let source = streams.resolve(id, kind, episode).await?;
            info!(id, %kind, "stream resolved");
            println!("{}", source.url);
            Ok(())
        }
        Some(Command::Search { query }) => {
            let catalog = CatalogClient::from_settings(&settings)?;
            let query = query.join(" ");
            for card in catalog.search(&query).await? {
                let year = card.release_date.as_deref().and_then(|date| date.get(..4)).unwrap_or("----");
                println!("{:>8}  {:<5}  {}  {}", card.id, card.kind.as_str(), year, card.title);
            }
            Ok(())
        }
    }
}

/// Install the global subscriber. While the TUI owns the terminal, logs go
/// to a file; otherwise to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if interactive {
        let path = default_log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}
