use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use crate::config::Config;
use crate::event::AppEvent;
use crate::identity::IdentityProvider;
use crate::prompt::{self, PromptSource};
use crate::score::{ScoreHistory, ScoreRecord, ScoreStore};
use crate::session::Session;
use crate::session::countdown::Countdown;
use crate::session::input::{self, InputOutcome};
use crate::ui::theme::Theme;

pub struct App {
    pub config: Config,
    pub theme: &'static Theme,
    pub session: Session,
    pub history: ScoreHistory,
    pub should_quit: bool,
    pub spinner_frame: usize,
    user_id: String,
    countdown: Countdown,
    prompt_source: Arc<dyn PromptSource>,
    score_store: Arc<dyn ScoreStore>,
    events: Sender<AppEvent>,
    submitted_generation: Option<u64>,
}

impl App {
    pub fn new(
        config: Config,
        theme: &'static Theme,
        prompt_source: Arc<dyn PromptSource>,
        score_store: Arc<dyn ScoreStore>,
        identity: &dyn IdentityProvider,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            config,
            theme,
            session: Session::new(0),
            history: ScoreHistory::new(),
            should_quit: false,
            spinner_frame: 0,
            user_id: identity.user_id(),
            countdown: Countdown::new(),
            prompt_source,
            score_store,
            events,
            submitted_generation: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Kick off the first prompt fetch and the history load.
    pub fn start(&mut self) {
        self.request_prompt();
        self.refresh_history();
    }

    /// Drop the current session, cancel its clock and fetch a new prompt.
    pub fn restart(&mut self) {
        self.session = self.session.restart();
        self.countdown.disarm();
        self.request_prompt();
    }

    pub fn type_char(&mut self, ch: char, now: Instant) -> InputOutcome {
        let outcome = input::process_char(&mut self.session, ch);
        self.countdown.sync(self.session.status(), now);
        outcome
    }

    pub fn backspace(&mut self, now: Instant) -> InputOutcome {
        let outcome = input::process_backspace(&mut self.session);
        self.countdown.sync(self.session.status(), now);
        outcome
    }

    /// Run the session clock for every second that became due.
    pub fn advance_clock(&mut self, now: Instant) {
        for _ in 0..self.countdown.poll(now) {
            if self.session.tick() {
                self.submit_result();
            }
        }
        self.countdown.sync(self.session.status(), now);
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Tick => {
                if self.session.is_loading() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
            AppEvent::PromptLoaded { generation, prompt } => {
                if !self.session.load_prompt(generation, &prompt) {
                    log::debug!("Dropping prompt for superseded session {generation}");
                }
            }
            AppEvent::ScoreSubmitted {
                generation,
                outcome,
            } => match outcome {
                Ok(record) => {
                    log::info!(
                        "Saved score for session {generation}: {} wpm, {}%",
                        record.words_per_minute,
                        record.accuracy_percent
                    );
                    self.refresh_history();
                }
                Err(message) => log::error!("Failed to submit score: {message}"),
            },
            AppEvent::HistoryLoaded { request, outcome } => {
                if let Err(message) = &outcome {
                    log::warn!("Score history unavailable: {message}");
                }
                self.history.settle(request, outcome);
            }
            AppEvent::Key(_) | AppEvent::Resize => {}
        }
        self.advance_clock(now);
    }

    fn request_prompt(&mut self) {
        let generation = self.session.generation();
        let source = Arc::clone(&self.prompt_source);
        let tx = self.events.clone();
        thread::spawn(move || {
            let prompt = prompt::fetch_prompt_or_fallback(source.as_ref());
            let _ = tx.send(AppEvent::PromptLoaded { generation, prompt });
        });
    }

    /// Post the finished session's result. Runs at most once per session.
    fn submit_result(&mut self) {
        let generation = self.session.generation();
        if self.submitted_generation == Some(generation) {
            return;
        }
        let Some(result) = self.session.result() else {
            return;
        };
        self.submitted_generation = Some(generation);

        let record = ScoreRecord::submission(&self.user_id, result);
        let store = Arc::clone(&self.score_store);
        let tx = self.events.clone();
        thread::spawn(move || {
            let outcome = store.submit_score(&record).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ScoreSubmitted {
                generation,
                outcome,
            });
        });
    }

    pub fn refresh_history(&mut self) {
        let request = self.history.begin_refresh();
        let user_id = self.user_id.clone();
        let store = Arc::clone(&self.score_store);
        let tx = self.events.clone();
        thread::spawn(move || {
            let outcome = store.fetch_scores(&user_id).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::HistoryLoaded { request, outcome });
        });
    }
}
