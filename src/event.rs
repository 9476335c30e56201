use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::score::ScoreRecord;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// The next draw picks up the new size; nothing else to carry.
    Resize,
    PromptLoaded {
        generation: u64,
        prompt: String,
    },
    ScoreSubmitted {
        generation: u64,
        outcome: Result<ScoreRecord, String>,
    },
    HistoryLoaded {
        request: u64,
        outcome: Result<Vec<ScoreRecord>, String>,
    },
}

/// Terminal input and ticks on one channel. Background workers report back
/// through `sender()` so only the main loop touches app state.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(..)) => {
                            if input_tx.send(AppEvent::Resize).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if input_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
