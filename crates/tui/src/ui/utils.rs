//! Layout and text helpers shared by the renderers.

use std::borrow::Cow;

use ratatui::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Creates a rectangle centered in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cut `text` to at most `width` display columns, ending in `…` when cut.
pub fn fit_width(text: &str, width: usize) -> Cow<'_, str> {
    if text.width() <= width {
        return Cow::Borrowed(text);
    }
    if width == 0 {
        return Cow::Borrowed("");
    }
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width - 1 {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    Cow::Owned(out)
}

/// Wrap `text` into at most `lines` lines of `width` columns; the last line is
/// cut with an ellipsis when text remains.
pub fn wrap_lines(text: &str, width: usize, lines: usize) -> Vec<String> {
    if width == 0 || lines == 0 {
        return Vec::new();
    }
    let wrapped = textwrap::wrap(text, width);
    let overflow = wrapped.len() > lines;
    let mut out: Vec<String> = wrapped.into_iter().take(lines).map(|line| line.into_owned()).collect();
    if overflow && let Some(last) = out.last_mut() {
        let extended = format!("{last}…");
        *last = fit_width(&extended, width).into_owned();
    }
    out
}

/// Release year from an ISO date such as `2021-05-05`.
pub fn year_of(date: Option<&str>) -> Option<&str> {
    date.and_then(|date| date.get(..4)).filter(|year| year.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn fit_width_adds_ellipsis() {
        assert_eq!(fit_width("short", 10), "short");
        assert_eq!(fit_width("much longer title", 8), "much lo…");
        assert_eq!(fit_width("anything", 0), "");
    }

    #[test]
    fn wrap_lines_marks_overflow() {
        let lines = wrap_lines("the quick brown fox jumps over", 10, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
        assert!(lines.iter().all(|line| line.width() <= 10));
    }

    #[test]
    fn year_of_reads_iso_dates() {
        assert_eq!(year_of(Some("1999-03-31")), Some("1999"));
        assert_eq!(year_of(Some("")), None);
        assert_eq!(year_of(None), None);
    }
}
