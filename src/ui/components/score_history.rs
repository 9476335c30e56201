use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::score::HistoryView;
use crate::ui::theme::Theme;

pub struct ScoreHistoryPanel<'a> {
    view: &'a HistoryView,
    theme: &'a Theme,
}

impl<'a> ScoreHistoryPanel<'a> {
    pub fn new(view: &'a HistoryView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_pending());
        match self.view {
            HistoryView::Idle | HistoryView::Loading => {
                vec![Line::from(Span::styled("Loading...", muted))]
            }
            HistoryView::Failed(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(colors.error()),
            ))],
            HistoryView::Loaded(records) if records.is_empty() => vec![Line::from(Span::styled(
                "No scores yet. Complete a test to see your history here.",
                muted,
            ))],
            // Newest first.
            HistoryView::Loaded(records) => records
                .iter()
                .rev()
                .map(|record| {
                    Line::from(vec![
                        Span::styled(" WPM: ", Style::default().fg(colors.fg())),
                        Span::styled(
                            format!("{:<4}", record.words_per_minute),
                            Style::default()
                                .fg(colors.success())
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" Accuracy: ", Style::default().fg(colors.fg())),
                        Span::styled(
                            format!("{}%", record.accuracy_percent),
                            Style::default()
                                .fg(colors.warning())
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                })
                .collect(),
        }
    }
}

impl Widget for ScoreHistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Your Score History ")
            .title_style(Style::default().fg(colors.accent()))
            .border_style(Style::default().fg(colors.border()));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreRecord;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_loaded_records_newest_first() {
        let theme = Theme::default();
        let records = vec![
            ScoreRecord {
                id: Some("1".to_string()),
                user_id: "u".to_string(),
                words_per_minute: 30,
                accuracy_percent: 90,
            },
            ScoreRecord {
                id: Some("2".to_string()),
                user_id: "u".to_string(),
                words_per_minute: 45,
                accuracy_percent: 97,
            },
        ];
        let view = HistoryView::Loaded(records);
        let lines = ScoreHistoryPanel::new(&view, &theme).lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[0]), " WPM: 45   Accuracy: 97%");
        assert_eq!(text(&lines[1]), " WPM: 30   Accuracy: 90%");
    }

    #[test]
    fn test_empty_and_failed_states() {
        let theme = Theme::default();
        let view = HistoryView::Loaded(Vec::new());
        let lines = ScoreHistoryPanel::new(&view, &theme).lines();
        assert!(text(&lines[0]).starts_with("No scores yet"));

        let view = HistoryView::Failed("Failed to fetch scores: 404 Not Found".to_string());
        let lines = ScoreHistoryPanel::new(&view, &theme).lines();
        assert_eq!(text(&lines[0]), "Failed to fetch scores: 404 Not Found");
    }
}
