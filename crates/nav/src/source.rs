use async_trait::async_trait;
use marquee_types::{FocusTarget, Section};
use tracing::{info, warn};

use crate::RowGrid;

/// Supplier of row contents.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch the items for `section`, in display order.
    async fn fetch(&self, section: Section) -> anyhow::Result<Vec<FocusTarget>>;
}

/// Fetch `section` from `source` and store the result in `grid`.
///
/// A failed fetch is logged and leaves the row as it was (empty on first
/// load). Returns the number of items stored.
pub async fn load_section(source: &dyn ItemSource, grid: &RowGrid, section: Section) -> usize {
    match source.fetch(section).await {
        Ok(items) => {
            let count = items.len();
            if grid.replace_section(section, items) {
                info!(section = %section, count, "row loaded");
                count
            } else {
                warn!(section = %section, "no row for loaded section");
                0
            }
        }
        Err(error) => {
            warn!(section = %section, error = %error, "failed to load row; leaving it empty");
            0
        }
    }
}
