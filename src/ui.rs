pub mod keyboard;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use kidkeys::{feedback::LetterMark, level::LevelId};
use unicode_width::UnicodeWidthStr;

use crate::{
    ui::keyboard::{KeyboardWidget, KEYBOARD_HEIGHT},
    App,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const HELP: &str = "Enter: start / check   Tab: new word   F2: levels   Esc: quit";

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tutor = &self.tutor;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // stats
                Constraint::Length(1),
                Constraint::Length(1), // message
                Constraint::Length(1),
                Constraint::Length(1), // target word
                Constraint::Length(1), // input
                Constraint::Length(1), // status
                Constraint::Length(1), // guidance
                Constraint::Length(1),
                Constraint::Length(KEYBOARD_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(1), // help
            ])
            .split(area);

        let stats = tutor.stats();
        Paragraph::new(Line::from(vec![
            Span::styled("Words: ", dim_style),
            Span::styled(stats.words_completed.to_string(), bold_style),
            Span::styled("   Accuracy: ", dim_style),
            Span::styled(stats.accuracy_display(), bold_style),
            Span::styled("   Level: ", dim_style),
            Span::styled(tutor.level_label().to_string(), bold_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            tutor.message().to_string(),
            Style::default().fg(Color::Magenta).patch(bold_style),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

        if !tutor.session.is_active() {
            Paragraph::new(Span::styled(
                "Press Enter to start!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        } else if tutor.session.has_target() {
            Paragraph::new(target_line(self))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);

            Paragraph::new(Line::from(vec![
                Span::styled("> ", dim_style),
                Span::styled(tutor.input().to_string(), bold_style),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        if let Some(status) = tutor.status() {
            let color = if status.is_positive() {
                Color::Green
            } else {
                Color::Red
            };
            Paragraph::new(Span::styled(
                status.message(),
                Style::default().fg(color).patch(bold_style),
            ))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
        }

        if let Some(guidance) = tutor.guidance() {
            Paragraph::new(Span::styled(guidance, Style::default().fg(Color::Cyan)))
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
        }

        KeyboardWidget {
            layout: &tutor.session_config.layout,
            highlighted: tutor.highlighted_key(),
        }
        .render(chunks[9], buf);

        Paragraph::new(Span::styled(HELP, dim_style))
            .alignment(Alignment::Center)
            .render(chunks[11], buf);

        if self.level_picker {
            render_level_picker(self, area, buf);
        }
    }
}

/// Target word, one styled letter per cell with a gap between letters.
fn target_line(app: &App) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let celebrating = app.celebration.is_active();

    let spans = app
        .tutor
        .feedback()
        .letters
        .into_iter()
        .flat_map(|(c, mark)| {
            let style = if celebrating {
                bold_style.fg(Color::Yellow)
            } else {
                match mark {
                    LetterMark::Correct => bold_style.fg(Color::Green),
                    LetterMark::Incorrect => bold_style.fg(Color::Red),
                    LetterMark::Current => bold_style
                        .fg(Color::White)
                        .add_modifier(Modifier::UNDERLINED),
                    LetterMark::Pending => bold_style.add_modifier(Modifier::DIM),
                }
            };
            [Span::styled(c.to_string(), style), Span::raw(" ")]
        })
        .collect::<Vec<_>>();

    Line::from(spans)
}

fn render_level_picker(app: &App, area: Rect, buf: &mut Buffer) {
    let widest = LevelId::KNOWN
        .iter()
        .map(|level| level.label().width())
        .max()
        .unwrap_or_default();
    // " 1. " prefix, borders and a little air
    let popup = centered_rect(
        (widest as u16 + 8).max(" Choose a level ".width() as u16 + 2),
        LevelId::KNOWN.len() as u16 + 4,
        area,
    );
    Clear.render(popup, buf);

    let mut lines = LevelId::KNOWN
        .iter()
        .enumerate()
        .map(|(idx, level)| {
            let style = if *level == app.tutor.session.level {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {}. {}", idx + 1, level.label()), style))
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Esc to close",
        Style::default().add_modifier(Modifier::DIM),
    )));

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Choose a level "),
        )
        .render(popup, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
