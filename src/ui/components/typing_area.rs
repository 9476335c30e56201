use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::Session;
use crate::session::input::{CharStatus, char_statuses};
use crate::ui::theme::Theme;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TypingArea<'a> {
    session: &'a Session,
    theme: &'a Theme,
    spinner_frame: usize,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme, spinner_frame: usize) -> Self {
        Self {
            session,
            theme,
            spinner_frame,
        }
    }
}

/// Header text for a test in progress: typed and total characters plus percent.
pub fn progress_label(session: &Session) -> String {
    format!(
        "{} / {} ({:.0}%)",
        session.input().len(),
        session.prompt().len(),
        session.progress() * 100.0
    )
}

/// Style and glyph for one prompt character.
fn styled_char(expected: char, status: CharStatus, theme: &Theme) -> Span<'static> {
    let colors = &theme.colors;
    match status {
        CharStatus::Correct => {
            Span::styled(expected.to_string(), Style::default().fg(colors.text_correct()))
        }
        // Show what should have been typed; a mistyped space is made visible.
        CharStatus::Incorrect(_) => {
            let display = if expected == ' ' { '\u{00b7}' } else { expected };
            Span::styled(
                display.to_string(),
                Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
            )
        }
        CharStatus::Current => Span::styled(
            expected.to_string(),
            Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
        ),
        CharStatus::Pending => {
            Span::styled(expected.to_string(), Style::default().fg(colors.text_pending()))
        }
    }
}

fn prompt_spans(session: &Session, theme: &Theme) -> Vec<Span<'static>> {
    session
        .prompt()
        .iter()
        .zip(char_statuses(session))
        .map(|(&expected, status)| styled_char(expected, status, theme))
        .collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        if self.session.is_loading() {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!("{frame} Generating a new challenge..."),
                Style::default().fg(colors.accent()),
            )))
            .alignment(Alignment::Center)
            .block(block);
            paragraph.render(area, buf);
            return;
        }

        let paragraph = Paragraph::new(Line::from(prompt_spans(self.session, self.theme)))
            .block(block)
            .wrap(Wrap { trim: false });
        paragraph.render(area, buf);
    }
}
