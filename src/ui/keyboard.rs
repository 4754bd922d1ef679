use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use kidkeys::guidance::{FingerZone, KeyboardLayout};

const ROWS: [&str; 4] = ["1234567890", "qwertyuiop", "asdfghjkl", "zxcvbnm"];
const SPACE_BAR: &str = "          space          ";

pub const KEYBOARD_HEIGHT: u16 = ROWS.len() as u16 + 1;

/// On-screen keyboard with keys tinted by finger and at most one key lit.
pub struct KeyboardWidget<'a> {
    pub layout: &'a KeyboardLayout,
    pub highlighted: Option<char>,
}

fn zone_color(zone: Option<FingerZone>) -> Color {
    match zone {
        Some(FingerZone::LeftPinky | FingerZone::RightPinky) => Color::Magenta,
        Some(FingerZone::LeftRing | FingerZone::RightRing) => Color::Blue,
        Some(FingerZone::LeftMiddle | FingerZone::RightMiddle) => Color::Green,
        Some(FingerZone::LeftIndex | FingerZone::RightIndex) => Color::Cyan,
        Some(FingerZone::Thumbs) => Color::Gray,
        None => Color::DarkGray,
    }
}

impl KeyboardWidget<'_> {
    fn key_style(&self, key: char) -> Style {
        if self.highlighted == Some(key) {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        let zone = self.layout.zone_tag(key).and_then(FingerZone::from_tag);
        Style::default().fg(zone_color(zone))
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line> = ROWS
            .iter()
            .map(|row| {
                let spans = row
                    .chars()
                    .map(|c| {
                        Span::styled(format!(" {} ", c.to_ascii_uppercase()), self.key_style(c))
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect();
        lines.push(Line::from(Span::styled(SPACE_BAR, self.key_style(' '))));
        lines
    }
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_keys(widget: &KeyboardWidget) -> Vec<char> {
        ROWS.iter()
            .flat_map(|row| row.chars())
            .chain(std::iter::once(' '))
            .filter(|&c| widget.key_style(c).bg == Some(Color::Yellow))
            .collect()
    }

    #[test]
    fn test_single_key_lit() {
        let layout = KeyboardLayout::qwerty();
        let widget = KeyboardWidget {
            layout: &layout,
            highlighted: Some('f'),
        };
        assert_eq!(lit_keys(&widget), vec!['f']);
    }

    #[test]
    fn test_no_key_lit() {
        let layout = KeyboardLayout::qwerty();
        let widget = KeyboardWidget {
            layout: &layout,
            highlighted: None,
        };
        assert!(lit_keys(&widget).is_empty());
    }

    #[test]
    fn test_keys_tinted_by_finger() {
        let layout = KeyboardLayout::qwerty();
        let widget = KeyboardWidget {
            layout: &layout,
            highlighted: None,
        };
        assert_eq!(widget.key_style('a').fg, Some(Color::Magenta));
        assert_eq!(widget.key_style('f').fg, Some(Color::Cyan));
        assert_eq!(widget.key_style('f').fg, widget.key_style('j').fg);
    }

    #[test]
    fn test_renders_rows() {
        let layout = KeyboardLayout::qwerty();
        let area = Rect::new(0, 0, 40, KEYBOARD_HEIGHT);
        let mut buffer = Buffer::empty(area);
        KeyboardWidget {
            layout: &layout,
            highlighted: Some('q'),
        }
        .render(area, &mut buffer);

        let rendered = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(rendered.contains(" Q  W  E "));
        assert!(rendered.contains("space"));
    }
}
