use keyrush::score::{MemoryScoreStore, ScoreRecord, ScoreStore};
use keyrush::session::input::{CharStatus, char_statuses};
use keyrush::session::{Session, SessionEvent, Status, TEST_DURATION_SECS, apply};

const PROMPT: &str = "The quick brown fox jumps over the lazy dog.";

fn loaded(generation: u64) -> Session {
    apply(
        Session::new(generation),
        SessionEvent::PromptLoaded {
            generation,
            prompt: PROMPT.to_string(),
        },
    )
}

fn ticks(mut session: Session, count: u32) -> Session {
    for _ in 0..count {
        session = apply(session, SessionEvent::Tick);
    }
    session
}

#[test]
fn full_test_reaches_finished_with_result() {
    let session = loaded(0);
    assert_eq!(session.status(), Status::Waiting);
    assert_eq!(session.remaining_secs(), TEST_DURATION_SECS);

    let session = apply(session, SessionEvent::Input("The quick brown".to_string()));
    assert_eq!(session.status(), Status::Started);

    let session = ticks(session, TEST_DURATION_SECS - 1);
    assert_eq!(session.status(), Status::Started);
    assert_eq!(session.remaining_secs(), 1);
    assert!(session.result().is_none());

    let session = apply(session, SessionEvent::Tick);
    assert_eq!(session.status(), Status::Finished);
    assert_eq!(session.remaining_secs(), 0);

    let result = session.result().unwrap();
    assert_eq!(result.correct_chars, 15);
    assert_eq!(result.accuracy, 100.0);
    assert_eq!(result.cpm, 30);
    assert_eq!(result.wpm, 6);
    assert_eq!(result.submitted_accuracy(), 100);
}

#[test]
fn clock_does_not_run_before_first_keystroke() {
    let session = ticks(loaded(0), 10);
    assert_eq!(session.status(), Status::Waiting);
    assert_eq!(session.remaining_secs(), TEST_DURATION_SECS);
}

#[test]
fn finished_session_ignores_input_and_ticks() {
    let session = apply(loaded(0), SessionEvent::Input("The".to_string()));
    let session = ticks(session, TEST_DURATION_SECS);
    let before = session.result().cloned();

    let session = apply(session, SessionEvent::Input("The quick".to_string()));
    let session = ticks(session, 3);
    assert_eq!(session.input_text(), "The");
    assert_eq!(session.remaining_secs(), 0);
    assert_eq!(session.result().cloned(), before);
}

#[test]
fn restart_discards_late_prompt_from_previous_generation() {
    let session = apply(Session::new(0), SessionEvent::Restart);
    assert_eq!(session.generation(), 1);
    assert!(session.is_loading());

    let session = apply(
        session,
        SessionEvent::PromptLoaded {
            generation: 0,
            prompt: "stale".to_string(),
        },
    );
    assert!(session.is_loading());
    assert!(session.prompt().is_empty());

    let session = apply(
        session,
        SessionEvent::PromptLoaded {
            generation: 1,
            prompt: PROMPT.to_string(),
        },
    );
    assert!(!session.is_loading());
    assert_eq!(session.prompt().len(), PROMPT.chars().count());
}

#[test]
fn restart_mid_test_resets_everything() {
    let session = apply(loaded(3), SessionEvent::Input("The q".to_string()));
    let session = ticks(session, 7);
    let session = apply(session, SessionEvent::Restart);
    assert_eq!(session.generation(), 4);
    assert_eq!(session.status(), Status::Waiting);
    assert_eq!(session.remaining_secs(), TEST_DURATION_SECS);
    assert!(session.input().is_empty());
    assert!(session.result().is_none());
}

#[test]
fn statuses_track_typed_prefix() {
    let session = apply(loaded(0), SessionEvent::Input("Thx".to_string()));
    let statuses = char_statuses(&session);
    assert_eq!(statuses.len(), PROMPT.chars().count());
    assert_eq!(statuses[0], CharStatus::Correct);
    assert_eq!(statuses[1], CharStatus::Correct);
    assert_eq!(statuses[2], CharStatus::Incorrect('x'));
    assert_eq!(statuses[3], CharStatus::Current);
    assert!(statuses[4..].iter().all(|s| *s == CharStatus::Pending));
}

#[test]
fn finished_result_submits_and_appears_in_history() {
    let session = apply(loaded(0), SessionEvent::Input("The quick brown".to_string()));
    let session = ticks(session, TEST_DURATION_SECS);
    let result = session.result().unwrap();

    let store = MemoryScoreStore::new();
    let saved = store
        .submit_score(&ScoreRecord::submission("user-7", result))
        .unwrap();
    assert!(saved.id.is_some());
    assert_eq!(saved.words_per_minute, 6);
    assert_eq!(saved.accuracy_percent, 100);

    let history = store.fetch_scores("user-7").unwrap();
    assert_eq!(history, vec![saved]);
    assert!(store.fetch_scores("someone-else").unwrap().is_empty());
}
