use ratatui::prelude::*;

use crate::app::{App, Mode};
use crate::ui::binder::ROW_HEIGHT;
use marquee_types::Section;

/// Screen areas, top to bottom.
pub struct MainLayout {
    pub navbar: Rect,
    pub search: Rect,
    pub rows: Rect,
    pub status: Rect,
    pub hints: Rect,
}

pub fn create_main_layout(size: Rect, app: &App) -> MainLayout {
    let search_height = if search_visible(app) { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // navbar
            Constraint::Length(search_height), // search box
            Constraint::Min(ROW_HEIGHT),       // rows
            Constraint::Length(1),             // status / indicator
            Constraint::Length(1),             // hints
        ])
        .split(size);
    MainLayout {
        navbar: chunks[0],
        search: chunks[1],
        rows: chunks[2],
        status: chunks[3],
        hints: chunks[4],
    }
}

pub fn search_visible(app: &App) -> bool {
    app.mode == Mode::Search || !app.search.query.is_empty()
}

/// Content rows worth drawing: every section below the navbar, with the
/// search row only while it is in use.
pub fn content_rows(app: &App) -> Vec<usize> {
    let grid = app.grid();
    (0..grid.row_count())
        .filter(|&row| match grid.section(row) {
            Some(Section::Navbar) | None => false,
            Some(Section::Search) => search_visible(app) || grid.row_len(row) > 0,
            Some(_) => true,
        })
        .collect()
}

/// Slice of `rows` that fits `capacity` rows and keeps `cursor_row` on screen.
pub fn row_window(rows: &[usize], cursor_row: usize, capacity: usize) -> &[usize] {
    let capacity = capacity.max(1);
    if rows.len() <= capacity {
        return rows;
    }
    let position = rows.iter().position(|&row| row >= cursor_row).unwrap_or(rows.len() - 1);
    let start = position.saturating_sub(capacity - 1).min(rows.len() - capacity);
    &rows[start..start + capacity]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_cursor_row_visible() {
        let rows = [1, 2, 3, 4, 5];
        assert_eq!(row_window(&rows, 0, 2), &[1, 2]);
        assert_eq!(row_window(&rows, 2, 2), &[1, 2]);
        assert_eq!(row_window(&rows, 4, 2), &[3, 4]);
        assert_eq!(row_window(&rows, 5, 3), &[3, 4, 5]);
    }

    #[test]
    fn window_returns_everything_when_it_fits() {
        let rows = [2, 3];
        assert_eq!(row_window(&rows, 3, 5), &[2, 3]);
    }

    #[test]
    fn hidden_cursor_row_snaps_to_next_visible() {
        // Row 1 (search) is hidden; the cursor on it shows the rows after it.
        let rows = [2, 3, 4, 5];
        assert_eq!(row_window(&rows, 1, 2), &[2, 3]);
    }
}
