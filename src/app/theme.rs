//! UI theme: configurable colors kept in one place instead of scattered through rendering.

use crate::kernel::ThemeSettings;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub border: Color,
    pub accent_fg: Color,
    pub header_fg: Color,
    pub folder_fg: Color,
    pub document_fg: Color,
    pub active_bg: Color,
    pub active_fg: Color,
    pub muted_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            border: Color::Indexed(8),       // DarkGray
            accent_fg: Color::Indexed(3),    // Yellow
            header_fg: Color::Indexed(6),    // Cyan
            folder_fg: Color::Indexed(3),    // Yellow
            document_fg: Color::Indexed(15), // White
            active_bg: Color::Indexed(8),    // DarkGray
            active_fg: Color::Indexed(15),   // White
            muted_fg: Color::Indexed(8),     // DarkGray
        }
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let slots: [(&Option<String>, &mut Color); 8] = [
            (&settings.border, &mut self.border),
            (&settings.accent_fg, &mut self.accent_fg),
            (&settings.header_fg, &mut self.header_fg),
            (&settings.folder_fg, &mut self.folder_fg),
            (&settings.document_fg, &mut self.document_fg),
            (&settings.active_bg, &mut self.active_bg),
            (&settings.active_fg, &mut self.active_fg),
            (&settings.muted_fg, &mut self.muted_fg),
        ];
        for (value, slot) in slots {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *slot = c;
            }
        }
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "darkgrey" => Color::Indexed(8),
        "white" => Color::Indexed(15),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        _ => return None,
    };

    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
