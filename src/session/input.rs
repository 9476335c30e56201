use crate::session::state::{Session, Status};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing stored: the session is finished or the value did not change.
    Ignored,
    /// First keystroke of the test.
    Started,
    Updated,
}

/// Per-character classification of the prompt against what has been typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
    Current,
    Pending,
}

/// Replace the typed value. Characters beyond the prompt length are dropped.
pub fn process_input(session: &mut Session, value: &str) -> InputOutcome {
    if session.status == Status::Finished {
        return InputOutcome::Ignored;
    }

    let value: Vec<char> = value.chars().take(session.prompt.len()).collect();
    if value == session.input {
        return InputOutcome::Ignored;
    }

    let outcome = if session.status == Status::Waiting {
        session.status = Status::Started;
        InputOutcome::Started
    } else {
        InputOutcome::Updated
    };
    session.input = value;
    outcome
}

/// Append one keystroke. Same contract as `process_input` without
/// rebuilding the typed value.
pub fn process_char(session: &mut Session, ch: char) -> InputOutcome {
    if session.status == Status::Finished || session.input.len() >= session.prompt.len() {
        return InputOutcome::Ignored;
    }
    let outcome = if session.status == Status::Waiting {
        session.status = Status::Started;
        InputOutcome::Started
    } else {
        InputOutcome::Updated
    };
    session.input.push(ch);
    outcome
}

pub fn process_backspace(session: &mut Session) -> InputOutcome {
    if session.status == Status::Finished || session.input.is_empty() {
        return InputOutcome::Ignored;
    }
    let value: String = session.input[..session.input.len() - 1].iter().collect();
    process_input(session, &value)
}

pub fn char_statuses(session: &Session) -> Vec<CharStatus> {
    let typed = session.input.len();
    session
        .prompt
        .iter()
        .enumerate()
        .map(|(idx, &expected)| {
            if idx < typed {
                let actual = session.input[idx];
                if actual == expected {
                    CharStatus::Correct
                } else {
                    CharStatus::Incorrect(actual)
                }
            } else if idx == typed {
                CharStatus::Current
            } else {
                CharStatus::Pending
            }
        })
        .collect()
}
