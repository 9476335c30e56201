use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥100 cols: test area + history sidebar
    Narrow, // <100 cols: history stacked under the test area
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub history: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        let (main, history) = match tier {
            LayoutTier::Wide => {
                let horizontal = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                    .split(vertical[1]);
                (horizontal[0], horizontal[1])
            }
            LayoutTier::Narrow => {
                let stacked = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(10), Constraint::Length(8)])
                    .split(vertical[1]);
                (stacked[0], stacked[1])
            }
        };

        Self {
            header: vertical[0],
            main,
            history,
            footer: vertical[2],
            tier,
        }
    }
}

/// Key hints for a one-row footer: as many as fit in `width`, in order.
pub fn fit_hints(hints: &[&str], width: usize) -> String {
    let mut line = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let separator = if line.is_empty() { " " } else { "  " };
        if line.chars().count() + separator.len() + hint.chars().count() > width {
            break;
        }
        line.push_str(separator);
        line.push_str(hint);
    }
    line
}
