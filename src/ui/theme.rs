use ratatui::style::{Color, Modifier, Style};

/// A named color palette. Themes are built in, selected by name from the
/// config and cycled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub display_fg: Color,
    pub display_bg: Color,
    pub preview_fg: Color,
    pub key_fg: Color,
    pub key_bg: Color,
    pub focused_fg: Color,
    pub focused_bg: Color,
    pub status_fg: Color,
    pub overlay_fg: Color,
    pub overlay_border: Color,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "dark",
        display_fg: Color::White,
        display_bg: Color::Rgb(24, 24, 24),
        preview_fg: Color::DarkGray,
        key_fg: Color::Gray,
        key_bg: Color::Rgb(24, 24, 24),
        focused_fg: Color::Black,
        focused_bg: Color::Cyan,
        status_fg: Color::DarkGray,
        overlay_fg: Color::White,
        overlay_border: Color::Cyan,
    },
    Theme {
        name: "light",
        display_fg: Color::Black,
        display_bg: Color::Rgb(235, 235, 235),
        preview_fg: Color::Gray,
        key_fg: Color::Black,
        key_bg: Color::Rgb(235, 235, 235),
        focused_fg: Color::White,
        focused_bg: Color::Blue,
        status_fg: Color::Gray,
        overlay_fg: Color::Black,
        overlay_border: Color::Blue,
    },
    Theme {
        name: "high-contrast",
        display_fg: Color::Yellow,
        display_bg: Color::Black,
        preview_fg: Color::Green,
        key_fg: Color::Yellow,
        key_bg: Color::Black,
        focused_fg: Color::Black,
        focused_bg: Color::Yellow,
        status_fg: Color::Yellow,
        overlay_fg: Color::Yellow,
        overlay_border: Color::Yellow,
    },
];

impl Theme {
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|theme| theme.name == name)
    }

    pub fn index_of(name: &str) -> Option<usize> {
        THEMES.iter().position(|theme| theme.name == name)
    }

    pub fn names() -> Vec<&'static str> {
        THEMES.iter().map(|theme| theme.name).collect()
    }

    pub fn display_style(&self) -> Style {
        Style::default().fg(self.display_fg).bg(self.display_bg)
    }

    pub fn preview_style(&self) -> Style {
        Style::default()
            .fg(self.preview_fg)
            .bg(self.display_bg)
            .add_modifier(Modifier::DIM)
    }

    pub fn key_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.focused_fg)
                .bg(self.focused_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.key_fg).bg(self.key_bg)
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_theme_resolves_by_name() {
        for theme in THEMES {
            assert_eq!(Theme::by_name(theme.name).map(|t| t.name), Some(theme.name));
        }
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(Theme::by_name("sepia").is_none());
        assert!(Theme::index_of("sepia").is_none());
    }

    #[test]
    fn theme_names_are_unique() {
        let mut names = Theme::names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), THEMES.len());
    }
}
