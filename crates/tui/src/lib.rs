//! # Marquee TUI
//!
//! A remote-control style media browser for the terminal. Rows of titles are
//! stacked vertically and scroll horizontally; the arrow keys move a single
//! focus cursor between them, Enter opens the details overlay.
//!
//! ## Architecture
//!
//! - [`app`]: pure state. `App::update` turns messages into effects.
//! - [`cmd`]: effect execution. Catalog and stream requests run as Tokio
//!   tasks whose results come back as messages.
//! - [`ui`]: the terminal view binder, rendering and the event loop.
//!
//! Focus movement, the input guard and row centering live in `marquee-nav`;
//! this crate only binds them to a terminal.

pub mod app;
pub mod cmd;
pub mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use marquee_api::{CatalogClient, StreamResolver};
use marquee_nav::{NavigationGuard, RowGrid};
use marquee_util::Settings;
use tracing::info;

use crate::app::App;
use crate::cmd::Services;

/// Runs the interactive browser until the user quits.
///
/// Must be called from within a Tokio runtime; the navigation guard schedules
/// its release on it.
pub async fn run(settings: Settings, catalog: CatalogClient, streams: StreamResolver) -> Result<()> {
    let grid = RowGrid::home();
    let guard = NavigationGuard::on_current_runtime(settings.guard_delay())
        .context("the navigation guard needs a running Tokio runtime")?;
    info!(
        start = %settings.start_section,
        guard_delay_ms = settings.guard_delay_ms,
        "starting browser"
    );

    let services = Services {
        catalog: Arc::new(catalog),
        streams: Arc::new(streams),
        grid: grid.clone(),
    };
    let app = App::new(settings, grid, guard);
    ui::runtime::run_app(app, services).await
}
