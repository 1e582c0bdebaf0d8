use std::collections::HashMap;

use ratatui::style::Color;

use super::style::{Fill, RankTier};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub purple: Color,
    pub selection_bg: Color,
    pub empty_cell: Color,
    pub preferred_1: Color,
    pub preferred_2: Color,
    pub preferred_3: Color,
    pub unavailable: Color,
    pub course: Color,
    pub cell_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            empty_cell: Color::Rgb(0x1E, 0x10, 0x33),
            preferred_1: Color::Rgb(0x16, 0xA3, 0x4A),
            preferred_2: Color::Rgb(0x22, 0xC5, 0x5E),
            preferred_3: Color::Rgb(0x4A, 0xDE, 0x80),
            unavailable: Color::Rgb(0xB9, 0x1C, 0x1C),
            course: Color::Rgb(0x25, 0x63, 0xEB),
            cell_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from `[ui] colors`, falling back to defaults
    pub fn from_colors(colors: &HashMap<String, String>) -> Self {
        let mut theme = Theme::default();
        for (key, value) in colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "purple" => theme.purple = color,
                    "selection_bg" => theme.selection_bg = color,
                    "empty_cell" => theme.empty_cell = color,
                    "preferred_1" => theme.preferred_1 = color,
                    "preferred_2" => theme.preferred_2 = color,
                    "preferred_3" => theme.preferred_3 = color,
                    "unavailable" => theme.unavailable = color,
                    "course" => theme.course = color,
                    "cell_text" => theme.cell_text = color,
                    _ => {}
                }
            }
        }
        theme
    }

    /// Background color for a cell fill
    pub fn fill_color(&self, fill: Fill) -> Color {
        match fill {
            Fill::Empty => self.empty_cell,
            Fill::Preferred(RankTier::First) => self.preferred_1,
            Fill::Preferred(RankTier::Second) => self.preferred_2,
            Fill::Preferred(RankTier::Lower) => self.preferred_3,
            Fill::Unavailable => self.unavailable,
            Fill::Course => self.course,
        }
    }
}
