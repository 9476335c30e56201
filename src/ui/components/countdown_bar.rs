use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Gauge, Widget};

use crate::ui::theme::Theme;

/// Seconds left at which the bar switches to the warning color.
const LOW_TIME_SECS: u32 = 5;

/// Bordered gauge that drains from full to empty as the test clock runs.
pub struct CountdownBar<'a> {
    remaining_secs: u32,
    total_secs: u32,
    theme: &'a Theme,
}

impl<'a> CountdownBar<'a> {
    pub fn new(remaining_secs: u32, total_secs: u32, theme: &'a Theme) -> Self {
        Self {
            remaining_secs: remaining_secs.min(total_secs),
            total_secs,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / self.total_secs as f64
    }

    fn color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.remaining_secs {
            0 => colors.error(),
            s if s <= LOW_TIME_SECS => colors.warning(),
            _ => colors.accent(),
        }
    }
}

impl Widget for CountdownBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Time ")
            .border_style(Style::default().fg(colors.border()));

        Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(self.color()).bg(colors.header_bg()))
            .label(format!("{}s", self.remaining_secs))
            .use_unicode(true)
            .ratio(self.ratio())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(area, buf);
    }
}
