use marquee_types::{BoundingBox, Cursor, FocusTarget};

/// How a scroll request should be applied by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animate towards the new offset.
    #[default]
    Smooth,
    /// Jump to the new offset.
    Instant,
}

/// Bridge between logical grid positions and whatever draws them.
///
/// Geometry is reported in viewport coordinates. Implementations return
/// `None` for positions they have no element for (content not rendered yet);
/// the navigator treats that as a missing target and skips the effect.
pub trait ViewBinder {
    /// Bounding box of the element at `at`.
    fn item_bounds(&self, at: Cursor) -> Option<BoundingBox>;

    /// Bounding box of the scrollable container holding row `row`.
    fn row_bounds(&self, row: usize) -> Option<BoundingBox>;

    /// Width of the visible viewport; its left edge is 0.
    fn viewport_width(&self) -> f64;

    /// Move visual focus to the element at `at`.
    fn focus(&mut self, at: Cursor, item: &FocusTarget);

    /// Scroll row `row` horizontally by `offset` (positive scrolls content left).
    fn scroll_row_by(&mut self, row: usize, offset: f64, behavior: ScrollBehavior);
}
