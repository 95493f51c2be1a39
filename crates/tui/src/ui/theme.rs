//! Semantic color roles and the two built-in palettes.
//!
//! Widgets ask the [`Theme`] for styles by role instead of hard-coding colors.
//! Truecolor terminals get the marquee palette; anything else falls back to
//! indexed colors.

use std::env;
use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,
    pub accent_secondary: Color,

    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,

    /// Backdrop behind the details overlay.
    pub modal_bg: Color,
}

pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        let style = Style::default().fg(color);
        if focused { style.add_modifier(Modifier::BOLD) } else { style }
    }

    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    fn modal_background_style(&self) -> Style {
        Style::default().bg(self.roles().modal_bg)
    }

    fn status_info(&self) -> Style {
        Style::default().fg(self.roles().info)
    }
    fn status_success(&self) -> Style {
        Style::default().fg(self.roles().success)
    }
    fn status_warning(&self) -> Style {
        Style::default().fg(self.roles().warning)
    }
    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    fn accent_primary_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }
    fn heading_style(&self) -> Style {
        Style::default().fg(self.roles().text).add_modifier(Modifier::BOLD)
    }
}

// Dark cinema palette.
const INK: Color = Color::Rgb(0x14, 0x14, 0x14);
const PANEL: Color = Color::Rgb(0x1F, 0x1F, 0x1F);
const SMOKE: Color = Color::Rgb(0x3A, 0x3A, 0x3A);
const SILVER: Color = Color::Rgb(0xB3, 0xB3, 0xB3);
const ASH: Color = Color::Rgb(0x80, 0x80, 0x80);
const WHITE: Color = Color::Rgb(0xF5, 0xF5, 0xF1);
const MARQUEE_RED: Color = Color::Rgb(0xE5, 0x09, 0x14);
const GOLD: Color = Color::Rgb(0xF5, 0xC5, 0x18);
const TEAL: Color = Color::Rgb(0x46, 0xD3, 0x69);

#[derive(Debug, Clone)]
pub struct MarqueeTheme {
    roles: ThemeRoles,
}

impl MarqueeTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: INK,
                surface: PANEL,
                border: SMOKE,
                text: WHITE,
                text_secondary: SILVER,
                text_muted: ASH,
                accent_primary: MARQUEE_RED,
                accent_secondary: GOLD,
                info: SILVER,
                success: TEAL,
                warning: GOLD,
                error: MARQUEE_RED,
                selection_bg: WHITE,
                selection_fg: INK,
                focus: WHITE,
                modal_bg: Color::Rgb(0x0A, 0x0A, 0x0A),
            },
        }
    }
}

impl Default for MarqueeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for MarqueeTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Indexed-color fallback for terminals without truecolor.
#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(233),
                surface: Color::Indexed(234),
                border: Color::Indexed(238),
                text: Color::Indexed(255),
                text_secondary: Color::Indexed(250),
                text_muted: Color::Indexed(244),
                accent_primary: Color::Indexed(160),
                accent_secondary: Color::Indexed(220),
                info: Color::Indexed(250),
                success: Color::Indexed(77),
                warning: Color::Indexed(220),
                error: Color::Indexed(160),
                selection_bg: Color::Indexed(255),
                selection_fg: Color::Indexed(233),
                focus: Color::Indexed(255),
                modal_bg: Color::Indexed(232),
            },
        }
    }
}

impl Default for Ansi256Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

fn supports_truecolor(colorterm: Option<&str>) -> bool {
    colorterm.is_some_and(|value| {
        let value = value.to_ascii_lowercase();
        value.contains("truecolor") || value.contains("24bit")
    })
}

/// Pick a palette from the terminal's advertised color support.
pub fn load() -> Box<dyn Theme> {
    let colorterm = env::var("COLORTERM").ok();
    if supports_truecolor(colorterm.as_deref()) {
        Box::new(MarqueeTheme::new())
    } else {
        debug!("truecolor not advertised; using indexed palette");
        Box::new(Ansi256Theme::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truecolor_detection() {
        assert!(supports_truecolor(Some("truecolor")));
        assert!(supports_truecolor(Some("24BIT")));
        assert!(!supports_truecolor(Some("256color")));
        assert!(!supports_truecolor(None));
    }

    #[test]
    fn focused_border_is_bold() {
        let theme = MarqueeTheme::new();
        assert!(theme.border_style(true).add_modifier.contains(Modifier::BOLD));
        assert!(!theme.border_style(false).add_modifier.contains(Modifier::BOLD));
    }
}
