use crate::session::input;
use crate::session::result::TestResult;

/// Length of every test. Not configurable.
pub const TEST_DURATION_SECS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Waiting,
    Started,
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    PromptLoaded { generation: u64, prompt: String },
    Input(String),
    Tick,
    Restart,
}

/// One typing attempt. A restart never mutates a session back to `Waiting`,
/// it replaces it with the session of the next generation.
#[derive(Clone, Debug)]
pub struct Session {
    pub(super) generation: u64,
    pub(super) loading: bool,
    pub(super) status: Status,
    pub(super) prompt: Vec<char>,
    pub(super) input: Vec<char>,
    pub(super) remaining_secs: u32,
    pub(super) result: Option<TestResult>,
}

impl Session {
    /// A session whose prompt is still being fetched.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            loading: true,
            status: Status::Waiting,
            prompt: Vec::new(),
            input: Vec::new(),
            remaining_secs: TEST_DURATION_SECS,
            result: None,
        }
    }

    pub fn with_prompt(prompt: &str) -> Self {
        let mut session = Self::new(0);
        session.load_prompt(0, prompt);
        session
    }

    /// Install a fetched prompt. Returns false when the fetch belongs to an
    /// older generation or the prompt has already been set.
    pub fn load_prompt(&mut self, generation: u64, prompt: &str) -> bool {
        if generation != self.generation || !self.loading {
            return false;
        }
        self.prompt = prompt.chars().collect();
        self.loading = false;
        true
    }

    /// Advance the clock by one second. Returns true on the tick that
    /// finished the session.
    pub fn tick(&mut self) -> bool {
        if self.status != Status::Started || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.finish();
            return true;
        }
        false
    }

    fn finish(&mut self) {
        self.status = Status::Finished;
        if self.result.is_none() {
            self.result = Some(TestResult::compute(
                &self.prompt,
                &self.input,
                TEST_DURATION_SECS,
            ));
        }
    }

    pub fn restart(&self) -> Session {
        Session::new(self.generation + 1)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn prompt(&self) -> &[char] {
        &self.prompt
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }

    pub fn progress(&self) -> f64 {
        if self.prompt.is_empty() {
            return 0.0;
        }
        self.input.len() as f64 / self.prompt.len() as f64
    }
}

/// Pure transition function over session events.
pub fn apply(mut session: Session, event: SessionEvent) -> Session {
    match event {
        SessionEvent::PromptLoaded { generation, prompt } => {
            session.load_prompt(generation, &prompt);
            session
        }
        SessionEvent::Input(value) => {
            input::process_input(&mut session, &value);
            session
        }
        SessionEvent::Tick => {
            session.tick();
            session
        }
        SessionEvent::Restart => session.restart(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(prompt: &str, typed: &str) -> Session {
        let session = Session::with_prompt(prompt);
        apply(session, SessionEvent::Input(typed.to_string()))
    }

    fn run_clock(mut session: Session, ticks: u32) -> Session {
        for _ in 0..ticks {
            session = apply(session, SessionEvent::Tick);
        }
        session
    }

    #[test]
    fn test_new_session_is_loading_and_waiting() {
        let session = Session::new(3);
        assert!(session.is_loading());
        assert_eq!(session.status(), Status::Waiting);
        assert_eq!(session.remaining_secs(), TEST_DURATION_SECS);
        assert!(session.result().is_none());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_tick_ignored_while_waiting() {
        let session = run_clock(Session::with_prompt("abc"), 5);
        assert_eq!(session.status(), Status::Waiting);
        assert_eq!(session.remaining_secs(), TEST_DURATION_SECS);
    }

    #[test]
    fn test_tick_counts_down_while_started() {
        let session = run_clock(started("abc", "a"), 10);
        assert_eq!(session.status(), Status::Started);
        assert_eq!(session.remaining_secs(), 20);
    }

    #[test]
    fn test_finishes_exactly_once_at_zero() {
        let mut session = started("abc", "a");
        let mut finishes = 0;
        for _ in 0..(TEST_DURATION_SECS + 5) {
            if session.tick() {
                finishes += 1;
            }
        }
        assert_eq!(finishes, 1);
        assert_eq!(session.status(), Status::Finished);
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn test_result_computed_on_finish_and_frozen() {
        let session = run_clock(started("The cat sat.", "The cat sit."), TEST_DURATION_SECS);
        let result = session.result().cloned().unwrap();
        assert_eq!(result.correct_chars, 11);
        assert_eq!(result.cpm, 22);
        assert_eq!(result.wpm, 4);
        assert!((result.accuracy - 91.67).abs() < 1e-9);

        // Neither further ticks nor input touch the frozen result.
        let session = run_clock(session, 3);
        let session = apply(session, SessionEvent::Input("The".to_string()));
        assert_eq!(session.result(), Some(&result));
        assert_eq!(session.input_text(), "The cat sit.");
    }

    #[test]
    fn test_restart_resets_everything() {
        let finished = run_clock(started("hello", "he"), TEST_DURATION_SECS);
        let fresh = apply(finished, SessionEvent::Restart);
        assert_eq!(fresh.status(), Status::Waiting);
        assert!(fresh.input().is_empty());
        assert_eq!(fresh.remaining_secs(), TEST_DURATION_SECS);
        assert!(fresh.result().is_none());
        assert!(fresh.is_loading());
        assert_eq!(fresh.generation(), 1);
    }

    #[test]
    fn test_restart_mid_test() {
        let running = run_clock(started("hello", "hel"), 4);
        let fresh = apply(running, SessionEvent::Restart);
        assert_eq!(fresh.status(), Status::Waiting);
        assert_eq!(fresh.remaining_secs(), TEST_DURATION_SECS);
    }

    #[test]
    fn test_stale_prompt_is_dropped_after_restart() {
        let first = Session::new(0);
        let second = apply(first, SessionEvent::Restart);
        let second = apply(
            second,
            SessionEvent::PromptLoaded {
                generation: 1,
                prompt: "fresh prompt".to_string(),
            },
        );
        let second = apply(
            second,
            SessionEvent::PromptLoaded {
                generation: 0,
                prompt: "stale prompt".to_string(),
            },
        );
        assert_eq!(second.prompt().iter().collect::<String>(), "fresh prompt");
    }

    #[test]
    fn test_stale_prompt_before_newer_one_arrives() {
        let session = Session::new(0).restart();
        let session = apply(
            session,
            SessionEvent::PromptLoaded {
                generation: 0,
                prompt: "stale".to_string(),
            },
        );
        assert!(session.is_loading());
        assert!(session.prompt().is_empty());
    }

    #[test]
    fn test_prompt_not_replaced_once_loaded() {
        let mut session = Session::with_prompt("first");
        assert!(!session.load_prompt(0, "second"));
        assert_eq!(session.prompt().len(), 5);
    }

    #[test]
    fn test_input_while_loading_is_ignored() {
        let session = apply(Session::new(0), SessionEvent::Input("abc".to_string()));
        assert_eq!(session.status(), Status::Waiting);
        assert!(session.input().is_empty());
    }
}
