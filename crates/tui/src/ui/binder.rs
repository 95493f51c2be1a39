//! Terminal-backed view binder.
//!
//! Rows are laid out as horizontal strips of fixed-width cards separated by a
//! small gap. Each row keeps its own horizontal scroll offset, measured in
//! cells. Smooth scrolls only move the target offset; [`TerminalBinder::animate`]
//! eases the drawn offset towards it on every tick.
//!
//! Geometry reported to the navigator uses viewport coordinates: the row
//! container spans the whole viewport, items are placed relative to the
//! row's scroll target.

use std::collections::HashMap;

use marquee_nav::{RowGrid, ScrollBehavior, ViewBinder};
use marquee_types::{BoundingBox, Cursor, FocusTarget};
use tracing::trace;

/// Horizontal space between two cards.
pub const CARD_GAP: u16 = 2;
/// Height of a card, borders included.
pub const CARD_HEIGHT: u16 = 6;
/// Height of one row: a heading line plus the cards.
pub const ROW_HEIGHT: u16 = CARD_HEIGHT + 1;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RowScroll {
    target: f64,
    current: f64,
}

#[derive(Debug)]
pub struct TerminalBinder {
    grid: RowGrid,
    card_width: u16,
    viewport_width: u16,
    scrolls: HashMap<usize, RowScroll>,
    focused: Option<Cursor>,
}

impl TerminalBinder {
    pub fn new(grid: RowGrid, card_width: u16) -> Self {
        Self {
            grid,
            card_width,
            viewport_width: 0,
            scrolls: HashMap::new(),
            focused: None,
        }
    }

    pub fn card_width(&self) -> u16 {
        self.card_width
    }

    /// Distance between the left edges of two neighbouring cards.
    pub fn stride(&self) -> f64 {
        f64::from(self.stride_cells())
    }

    /// [`Self::stride`] in whole cells.
    pub fn stride_cells(&self) -> i32 {
        i32::from(self.card_width) + i32::from(CARD_GAP)
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
        let rows: Vec<usize> = self.scrolls.keys().copied().collect();
        for row in rows {
            self.clamp_row(row);
        }
    }

    /// Position that last received visual focus.
    pub fn focused(&self) -> Option<Cursor> {
        self.focused
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Offset the row is currently drawn at, in whole cells.
    pub fn drawn_offset(&self, row: usize) -> u16 {
        let current = self.scrolls.get(&row).map_or(0.0, |scroll| scroll.current);
        current.round().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    /// Offset the row is heading towards.
    pub fn target_offset(&self, row: usize) -> f64 {
        self.scrolls.get(&row).map_or(0.0, |scroll| scroll.target)
    }

    fn content_width(&self, row: usize) -> f64 {
        let len = self.grid.row_len(row);
        if len == 0 {
            return 0.0;
        }
        len as f64 * self.stride() - f64::from(CARD_GAP)
    }

    fn max_offset(&self, row: usize) -> f64 {
        (self.content_width(row) - f64::from(self.viewport_width)).max(0.0)
    }

    fn clamp_row(&mut self, row: usize) {
        let max = self.max_offset(row);
        if let Some(scroll) = self.scrolls.get_mut(&row) {
            scroll.target = scroll.target.clamp(0.0, max);
            scroll.current = scroll.current.clamp(0.0, max);
        }
    }

    /// Scroll `row` by one viewport width; `forward` scrolls towards later items.
    pub fn scroll_page(&mut self, row: usize, forward: bool) {
        let step = f64::from(self.viewport_width);
        let offset = if forward { step } else { -step };
        self.scroll_row_by(row, offset, ScrollBehavior::Smooth);
    }

    /// Ease every row one step towards its target. Returns `true` while any
    /// row is still moving.
    pub fn animate(&mut self) -> bool {
        let rows: Vec<usize> = self.scrolls.keys().copied().collect();
        let mut moving = false;
        for row in rows {
            self.clamp_row(row);
            if let Some(scroll) = self.scrolls.get_mut(&row) {
                let remaining = scroll.target - scroll.current;
                if remaining.abs() < 0.5 {
                    scroll.current = scroll.target;
                    continue;
                }
                let step = (remaining / 2.0).abs().max(1.0).min(remaining.abs());
                scroll.current += step.copysign(remaining);
                moving = true;
            }
        }
        moving
    }

    /// Whether any row is drawn away from its target.
    pub fn is_animating(&self) -> bool {
        self.scrolls
            .values()
            .any(|scroll| (scroll.target - scroll.current).abs() >= 0.5)
    }

    /// Index of the first card of `row` that is at least partly visible, and
    /// the cell at which it starts (negative when clipped on the left).
    pub fn first_visible(&self, row: usize) -> (usize, i32) {
        let offset = i32::from(self.drawn_offset(row));
        let stride = self.stride_cells();
        let first = (offset / stride).max(0);
        (first as usize, first * stride - offset)
    }
}

impl ViewBinder for TerminalBinder {
    fn item_bounds(&self, at: Cursor) -> Option<BoundingBox> {
        if at.col >= self.grid.row_len(at.row) {
            return None;
        }
        let left = at.col as f64 * self.stride() - self.target_offset(at.row);
        let top = at.row as f64 * f64::from(ROW_HEIGHT) + 1.0;
        Some(BoundingBox::new(left, top, f64::from(self.card_width), f64::from(CARD_HEIGHT)))
    }

    fn row_bounds(&self, row: usize) -> Option<BoundingBox> {
        if row >= self.grid.row_count() {
            return None;
        }
        let top = row as f64 * f64::from(ROW_HEIGHT);
        Some(BoundingBox::new(
            0.0,
            top,
            f64::from(self.viewport_width),
            f64::from(ROW_HEIGHT),
        ))
    }

    fn viewport_width(&self) -> f64 {
        f64::from(self.viewport_width)
    }

    fn focus(&mut self, at: Cursor, item: &FocusTarget) {
        trace!(%at, label = item.label(), "focus");
        self.focused = Some(at);
    }

    fn scroll_row_by(&mut self, row: usize, offset: f64, behavior: ScrollBehavior) {
        let max = self.max_offset(row);
        let scroll = self.scrolls.entry(row).or_default();
        scroll.target = (scroll.target + offset).clamp(0.0, max);
        if behavior == ScrollBehavior::Instant {
            scroll.current = scroll.target;
        }
    }
}
