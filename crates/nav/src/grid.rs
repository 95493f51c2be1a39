//! Shared row storage.
//!
//! Rows are fixed in number and order once the grid is built; only their
//! contents change. Loaders hold a clone of the [`RowGrid`] handle and replace
//! a row's items when a fetch completes, while the navigator reads lengths and
//! items at the moment it needs them. Nothing caches a row length across
//! calls.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use marquee_types::{Cursor, FocusTarget, NavLink, Section};
use tracing::debug;

/// One horizontal row of focusable items.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub section: Section,
    pub items: Vec<FocusTarget>,
    /// Bumped every time the row's items are replaced.
    pub revision: u64,
}

impl Row {
    pub fn new(section: Section, items: Vec<FocusTarget>) -> Self {
        Self {
            section,
            items,
            revision: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cloneable handle to the rows of the navigation grid.
#[derive(Debug, Clone, Default)]
pub struct RowGrid {
    rows: Arc<RwLock<Vec<Row>>>,
}

impl RowGrid {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Empty rows for `sections`, in the given order.
    pub fn with_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        Self::from_rows(sections.into_iter().map(|section| Row::new(section, Vec::new())).collect())
    }

    /// The home screen layout: every [`Section`] in order, with the navbar
    /// populated and every other row waiting for content.
    pub fn home() -> Self {
        let rows = Section::ALL
            .iter()
            .map(|&section| match section {
                Section::Navbar => Row::new(section, NavLink::navbar().into_iter().map(FocusTarget::Link).collect()),
                _ => Row::new(section, Vec::new()),
            })
            .collect();
        Self::from_rows(rows)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Row>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Row>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn row_count(&self) -> usize {
        self.read().len()
    }

    /// Current length of `row`; 0 for rows that do not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.read().get(row).map_or(0, Row::len)
    }

    /// Lengths of every row, read under a single lock.
    pub fn row_lengths(&self) -> Vec<usize> {
        self.read().iter().map(Row::len).collect()
    }

    pub fn item_at(&self, at: Cursor) -> Option<FocusTarget> {
        self.read().get(at.row)?.items.get(at.col).cloned()
    }

    pub fn revision(&self, row: usize) -> Option<u64> {
        self.read().get(row).map(|row| row.revision)
    }

    pub fn section(&self, row: usize) -> Option<Section> {
        self.read().get(row).map(|row| row.section)
    }

    pub fn index_of(&self, section: Section) -> Option<usize> {
        self.read().iter().position(|row| row.section == section)
    }

    /// Snapshot of one row, for rendering.
    pub fn row(&self, row: usize) -> Option<Row> {
        self.read().get(row).cloned()
    }

    /// Snapshot of all rows, for rendering.
    pub fn rows(&self) -> Vec<Row> {
        self.read().clone()
    }

    /// Replace the items of the row showing `section`.
    ///
    /// Returns `false` when the grid has no such row.
    pub fn replace_section(&self, section: Section, items: Vec<FocusTarget>) -> bool {
        let mut rows = self.write();
        let Some(row) = rows.iter_mut().find(|row| row.section == section) else {
            return false;
        };
        debug!(section = %section, previous = row.items.len(), next = items.len(), "replacing row items");
        row.items = items;
        row.revision = row.revision.wrapping_add(1);
        true
    }

    /// Replace the items of row `row` by index.
    pub fn replace_row(&self, row: usize, items: Vec<FocusTarget>) -> bool {
        let section = self.section(row);
        section.is_some_and(|section| self.replace_section(section, items))
    }

    pub fn clear_section(&self, section: Section) -> bool {
        self.replace_section(section, Vec::new())
    }
}
