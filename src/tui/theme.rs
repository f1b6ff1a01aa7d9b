use ratatui::style::Color;

use crate::model::{Priority, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    /// Input field fill
    pub surface: Color,
    pub text: Color,
    pub label: Color,
    pub dim: Color,
    pub placeholder: Color,
    pub accent: Color,
    /// Text drawn on top of `accent`
    pub on_accent: Color,
    /// Cursor row in the list
    pub highlight: Color,
    pub red: Color,
    pub yellow: Color,
    pub blue: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x2A, 0x23),
            surface: Color::Rgb(0x37, 0x37, 0x37),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            label: Color::Rgb(0xD1, 0xD5, 0xDB),
            dim: Color::Rgb(0x9C, 0xA3, 0xAF),
            placeholder: Color::Rgb(0x6B, 0x72, 0x80),
            accent: Color::Rgb(0x2E, 0xBD, 0x85),
            on_accent: Color::Rgb(0x00, 0x00, 0x00),
            highlight: Color::Rgb(0x26, 0x40, 0x35),
            red: Color::Rgb(0xFF, 0x5C, 0x5C),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            blue: Color::Rgb(0x60, 0xA5, 0xFA),
        }
    }
}

/// Parse a hex color string like "#2EBD85" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring invalid color");
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "surface" => &mut theme.surface,
                "text" => &mut theme.text,
                "label" => &mut theme.label,
                "dim" => &mut theme.dim,
                "placeholder" => &mut theme.placeholder,
                "accent" => &mut theme.accent,
                "on_accent" => &mut theme.on_accent,
                "highlight" => &mut theme.highlight,
                "red" => &mut theme.red,
                "yellow" => &mut theme.yellow,
                "blue" => &mut theme.blue,
                _ => {
                    tracing::warn!(slot = %key, "unknown color slot");
                    continue;
                }
            };
            *slot = color;
        }

        theme
    }

    /// Color for a priority label
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.blue,
        }
    }
}
