use crate::score::ScoreRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryView {
    Idle,
    Loading,
    Loaded(Vec<ScoreRecord>),
    Failed(String),
}

/// The history panel's state. Each refresh gets a request number and only
/// the newest request may settle the view.
pub struct ScoreHistory {
    view: HistoryView,
    latest_request: u64,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self {
            view: HistoryView::Idle,
            latest_request: 0,
        }
    }

    pub fn view(&self) -> &HistoryView {
        &self.view
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.latest_request += 1;
        self.view = HistoryView::Loading;
        self.latest_request
    }

    /// Returns false when the response belongs to a superseded request.
    pub fn settle(&mut self, request: u64, outcome: Result<Vec<ScoreRecord>, String>) -> bool {
        if request != self.latest_request {
            return false;
        }
        self.view = match outcome {
            Ok(records) => HistoryView::Loaded(records),
            Err(message) if message.trim().is_empty() => {
                HistoryView::Failed("Failed to load score history".to_string())
            }
            Err(message) => HistoryView::Failed(message),
        };
        true
    }
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::new()
    }
}
