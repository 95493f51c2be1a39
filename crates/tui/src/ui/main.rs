//! Frame rendering.
//!
//! Draws the navbar, the optional search box, the visible rows of cards, the
//! status line and the hint bar, then the details overlay on top when open.

use marquee_types::{Cursor, FocusTarget, MediaCard, MediaKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::{App, DetailsState, Mode, StreamState};
use crate::ui::binder::{CARD_HEIGHT, ROW_HEIGHT};
use crate::ui::layout::{content_rows, create_main_layout, row_window};
use crate::ui::theme::Theme;
use crate::ui::utils::{centered_rect, fit_width, wrap_lines, year_of};

pub fn draw(frame: &mut Frame, app: &App, theme: &dyn Theme) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.roles().background)), size);

    let layout = create_main_layout(size, app);
    render_navbar(frame, app, theme, layout.navbar);
    if layout.search.height > 0 {
        render_search(frame, app, theme, layout.search);
    }
    render_rows(frame, app, theme, layout.rows);
    render_status(frame, app, theme, layout.status);
    render_hints(frame, app, theme, layout.hints);

    if app.mode == Mode::Details
        && let Some(details) = app.details.as_ref()
    {
        render_details(frame, app, details, theme);
    }
}

fn is_focused(app: &App, at: Cursor) -> bool {
    app.navigator.focused() == Some(at)
}

fn render_navbar(frame: &mut Frame, app: &App, theme: &dyn Theme, area: Rect) {
    let mut spans = vec![Span::styled(" MARQUEE ", theme.accent_emphasis_style()), Span::raw("  ")];
    if let Some(row) = app.grid().row(0) {
        for (col, item) in row.items.iter().enumerate() {
            let style = if is_focused(app, Cursor::new(0, col)) {
                theme.selection_style().add_modifier(Modifier::BOLD)
            } else {
                theme.text_secondary_style()
            };
            spans.push(Span::styled(format!(" {} ", item.label()), style));
            spans.push(Span::raw(" "));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search(frame: &mut Frame, app: &App, theme: &dyn Theme, area: Rect) {
    let typing = app.mode == Mode::Search;
    let mut title = String::from(" Search ");
    if app.search.loading {
        title.push_str("(searching…) ");
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(typing))
        .title(Span::styled(title, theme.text_secondary_style()));

    let line = if app.search.query.is_empty() && typing {
        Line::from(Span::styled(
            format!("Type at least {} characters…", app.settings.search_min_chars),
            theme.text_muted_style(),
        ))
    } else {
        let mut spans = vec![Span::styled(app.search.query.clone(), theme.text_primary_style())];
        if typing {
            spans.push(Span::styled("▏", theme.accent_primary_style()));
        }
        if let Some(message) = &app.search.message {
            spans.push(Span::styled(format!("   {message}"), theme.status_warning()));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_rows(frame: &mut Frame, app: &App, theme: &dyn Theme, area: Rect) {
    let rows = content_rows(app);
    let capacity = usize::from(area.height / ROW_HEIGHT);
    let window = row_window(&rows, app.navigator.cursor().row, capacity);
    for (slot, &row) in window.iter().enumerate() {
        let top = area.y + slot as u16 * ROW_HEIGHT;
        let row_area = Rect::new(area.x, top, area.width, ROW_HEIGHT).intersection(area);
        render_row(frame, app, theme, row, row_area);
    }
}

fn render_row(frame: &mut Frame, app: &App, theme: &dyn Theme, row: usize, area: Rect) {
    let Some(contents) = app.grid().row(row) else {
        return;
    };
    let heading_style = if app.navigator.cursor().row == row {
        theme.heading_style()
    } else {
        theme.text_secondary_style()
    };
    let heading = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(contents.section.heading(), heading_style)),
        heading,
    );

    let strip = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
    if contents.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("  Nothing here yet", theme.text_muted_style())),
            strip,
        );
        return;
    }

    let card_width = app.binder.card_width();
    let stride = app.binder.stride_cells();
    let (first, start_x) = app.binder.first_visible(row);
    for (offset, item) in contents.items.iter().enumerate().skip(first) {
        let x = start_x + (offset - first) as i32 * stride;
        if x >= i32::from(strip.width) {
            break;
        }
        // Cards clipped on the left are skipped.
        if x < 0 {
            continue;
        }
        let rect = Rect::new(strip.x + x as u16, strip.y, card_width, CARD_HEIGHT).intersection(strip);
        render_card(frame, app, theme, item, is_focused(app, Cursor::new(row, offset)), rect);
    }
}

fn render_card(frame: &mut Frame, app: &App, theme: &dyn Theme, item: &FocusTarget, focused: bool, area: Rect) {
    let block = Block::default().borders(Borders::ALL).border_style(theme.border_style(focused));
    let inner = block.inner(area);
    let width = usize::from(inner.width);

    let mut lines: Vec<Line> = Vec::new();
    let title_style = if focused {
        theme.heading_style()
    } else {
        theme.text_primary_style()
    };
    for line in wrap_lines(item.label(), width, 2) {
        lines.push(Line::from(Span::styled(line, title_style)));
    }
    if let FocusTarget::Card(card) = item {
        lines.push(Line::from(Span::styled(
            fit_width(&card_meta(card), width).into_owned(),
            theme.text_muted_style(),
        )));
        let mut rating = card
            .vote_average
            .map(|vote| format!("★ {vote:.1}"))
            .unwrap_or_default();
        if app.is_favorite(card) {
            rating.push_str(" ♥");
        }
        lines.push(Line::from(Span::styled(rating, theme.status_warning())));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn card_meta(card: &MediaCard) -> String {
    let kind = match card.kind {
        MediaKind::Movie => "Film",
        MediaKind::Tv => "Series",
    };
    match year_of(card.release_date.as_deref()) {
        Some(year) => format!("{year} · {kind}"),
        None => kind.to_string(),
    }
}

fn render_status(frame: &mut Frame, app: &App, theme: &dyn Theme, area: Rect) {
    let line = if let Some((section, _)) = app.indicator {
        Line::from(vec![
            Span::styled("Currently in: ", theme.text_muted_style()),
            Span::styled(section.title(), theme.accent_emphasis_style()),
        ])
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), theme.status_info()))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn hint_pairs(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Browse => &[
            ("←↑↓→", " move  "),
            ("Enter", " open  "),
            ("PgUp/PgDn", " scroll row  "),
            ("/", " search  "),
            ("q", " quit"),
        ],
        Mode::Search => &[("type", " query  "), ("Enter/↓", " results  "), ("Esc", " close search")],
        Mode::Details => &[
            ("↑↓", " episode  "),
            ("[ ]", " season  "),
            ("Enter", " episode stream  "),
            ("p", " play  "),
            ("f", " favorite  "),
            ("Esc", " back"),
        ],
    }
}

fn render_hints(frame: &mut Frame, app: &App, theme: &dyn Theme, area: Rect) {
    let mut spans = vec![Span::styled("Hints: ", theme.text_muted_style())];
    for (key, label) in hint_pairs(app.mode) {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*label, theme.text_muted_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_details(frame: &mut Frame, app: &App, details: &DetailsState, theme: &dyn Theme) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let favorite = if app.is_favorite(&details.card) { " ♥" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(theme.modal_background_style())
        .title(Span::styled(
            format!(" {}{favorite} ", details.card.title),
            theme.accent_emphasis_style(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let is_series = details.card.kind == MediaKind::Tv;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if is_series {
            [Constraint::Min(8), Constraint::Percentage(45)]
        } else {
            [Constraint::Min(8), Constraint::Length(0)]
        })
        .split(inner);

    frame.render_widget(
        Paragraph::new(summary_lines(details, theme)).wrap(Wrap { trim: true }),
        chunks[0],
    );
    if is_series {
        render_episodes(frame, details, theme, chunks[1]);
    }
}

fn summary_lines(details: &DetailsState, theme: &dyn Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(error) = &details.error {
        lines.push(Line::from(Span::styled(format!("Error: {error}"), theme.status_error())));
    }
    let Some(payload) = &details.payload else {
        lines.push(Line::from(Span::styled("Loading details…", theme.text_muted_style())));
        lines.push(stream_line(details, theme));
        return lines;
    };

    let info = &payload.details;
    lines.push(Line::from(vec![
        Span::styled("Released: ", theme.text_muted_style()),
        Span::styled(info.release_label(details.card.kind), theme.text_primary_style()),
        Span::styled("   Rating: ", theme.text_muted_style()),
        Span::styled(info.rating_label(), theme.status_warning()),
    ]));
    if !info.genres.is_empty() {
        let genres: Vec<&str> = info.genres.iter().map(|genre| genre.name.as_str()).collect();
        lines.push(Line::from(Span::styled(genres.join(" · "), theme.text_secondary_style())));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(info.overview.clone(), theme.text_primary_style())));
    lines.push(Line::default());

    let cast: Vec<&str> = payload
        .credits
        .top_billed(5)
        .map(|member| member.name.as_str())
        .collect();
    if !cast.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Cast: ", theme.text_muted_style()),
            Span::styled(cast.join(", "), theme.text_secondary_style()),
        ]));
    }
    if let Some(trailer) = payload.videos.trailer() {
        lines.push(Line::from(vec![
            Span::styled("Trailer: ", theme.text_muted_style()),
            Span::styled(
                format!("https://www.youtube.com/watch?v={}", trailer.key),
                theme.text_secondary_style(),
            ),
        ]));
    }
    lines.push(stream_line(details, theme));
    lines
}

fn stream_line(details: &DetailsState, theme: &dyn Theme) -> Line<'static> {
    let label = Span::styled("Stream: ", theme.text_muted_style());
    let value = match &details.stream {
        StreamState::Idle => Span::styled("select an episode", theme.text_muted_style()),
        StreamState::Resolving => Span::styled("resolving…", theme.text_muted_style()),
        StreamState::Ready(url) => Span::styled(url.clone(), theme.status_success()),
        StreamState::Failed(error) => Span::styled(error.clone(), theme.status_error()),
    };
    Line::from(vec![label, value])
}

fn render_episodes(frame: &mut Frame, details: &DetailsState, theme: &dyn Theme, area: Rect) {
    let season_count = details
        .payload
        .as_ref()
        .and_then(|payload| payload.details.number_of_seasons)
        .unwrap_or(details.season);
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style(false))
        .title(Span::styled(
            format!(" Season {} of {season_count} ", details.season),
            theme.text_secondary_style(),
        ));

    if details.episodes.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Loading episodes…", theme.text_muted_style())).block(block),
            area,
        );
        return;
    }

    let width = usize::from(area.width.saturating_sub(2));
    let items: Vec<ListItem> = details
        .episodes
        .iter()
        .map(|episode| {
            ListItem::new(vec![
                Line::from(Span::styled(fit_width(&episode.heading(), width).into_owned(), theme.text_primary_style())),
                Line::from(Span::styled(fit_width(&episode.summary(), width).into_owned(), theme.text_muted_style())),
            ])
        })
        .collect();
    let list = List::new(items).block(block).highlight_style(theme.selection_style());
    let mut state = ListState::default().with_selected(Some(details.selected_episode));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_meta_shows_year_and_kind() {
        let card = MediaCard {
            id: 1,
            kind: MediaKind::Tv,
            title: "Show".into(),
            poster_url: None,
            release_date: Some("2008-01-20".into()),
            vote_average: None,
        };
        assert_eq!(card_meta(&card), "2008 · Series");
    }

    #[test]
    fn every_mode_has_hints() {
        for mode in [Mode::Browse, Mode::Search, Mode::Details] {
            assert!(!hint_pairs(mode).is_empty());
        }
    }
}
