//! Auto-centering for horizontal moves.
//!
//! The focused item is centered inside its row container first. Afterwards the
//! container's own box is re-read and, when it sticks out of the viewport, a
//! second scroll pulls it back: the right edge takes priority over the left.

use marquee_types::{BoundingBox, Cursor};
use tracing::trace;

use crate::{NavError, ScrollBehavior, ViewBinder};

/// Relative scroll that puts the center of `item` on the center of `row`.
pub fn centering_offset(item: &BoundingBox, row: &BoundingBox) -> f64 {
    item.left - row.left + item.width / 2.0 - row.width / 2.0
}

/// Extra scroll needed to keep `row` inside a viewport of `viewport_width`.
///
/// Returns the overflow past the right edge when there is one, otherwise the
/// gap between the viewport's left edge and the row, otherwise `None`.
pub fn edge_correction(row: &BoundingBox, viewport_width: f64) -> Option<f64> {
    if row.right() > viewport_width {
        Some(row.right() - viewport_width)
    } else if row.left > 0.0 {
        Some(row.left)
    } else {
        None
    }
}

fn laid_out(bounds: Option<BoundingBox>, at: Cursor) -> Result<BoundingBox, NavError> {
    let bounds = bounds.ok_or(NavError::MissingTarget(at))?;
    if bounds.is_degenerate() {
        return Err(NavError::StaleGeometry { row: at.row });
    }
    Ok(bounds)
}

/// Scroll the row holding `at` so the item there is centered.
///
/// Degenerate geometry aborts before any scroll is issued; a degenerate box on
/// the second read skips only the edge correction.
pub fn center_item(binder: &mut dyn ViewBinder, at: Cursor) -> Result<(), NavError> {
    let item = laid_out(binder.item_bounds(at), at)?;
    let row = laid_out(binder.row_bounds(at.row), at)?;

    let offset = centering_offset(&item, &row);
    trace!(row = at.row, col = at.col, offset, "centering item");
    binder.scroll_row_by(at.row, offset, ScrollBehavior::Smooth);

    let settled = laid_out(binder.row_bounds(at.row), at)?;
    if let Some(correction) = edge_correction(&settled, binder.viewport_width()) {
        trace!(row = at.row, correction, "keeping row inside viewport");
        binder.scroll_row_by(at.row, correction, ScrollBehavior::Smooth);
    }
    Ok(())
}
