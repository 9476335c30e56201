use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::TestResult;
use crate::ui::theme::Theme;

/// The three result cards shown when a test finishes.
pub struct ResultCards<'a> {
    result: &'a TestResult,
    theme: &'a Theme,
}

impl<'a> ResultCards<'a> {
    pub fn new(result: &'a TestResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }

    fn cards(&self) -> [(&'static str, String, Color); 3] {
        let colors = &self.theme.colors;
        [
            ("WPM", format!("{}", self.result.wpm), colors.success()),
            (
                "Accuracy",
                format!("{}%", format_accuracy(self.result.accuracy)),
                colors.warning(),
            ),
            ("Time", format!("{}s", self.result.duration_secs), colors.accent()),
        ]
    }
}

/// Two decimals at most, without trailing zeros: 91.67, 87.5, 100.
pub fn format_accuracy(accuracy: f64) -> String {
    let formatted = format!("{accuracy:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

impl Widget for ResultCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Test Complete!",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(sections[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(sections[1]);

        for ((label, value, color), column) in self.cards().into_iter().zip(columns.iter()) {
            let block = Block::bordered()
                .title(format!(" {label} "))
                .border_style(Style::default().fg(colors.border()));
            let card = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            card.render(*column, buf);
        }

        let hint = Paragraph::new(Line::from(Span::styled(
            "Press [Tab] to try again",
            Style::default().fg(colors.text_pending()),
        )))
        .alignment(Alignment::Center);
        hint.render(sections[2], buf);
    }
}
