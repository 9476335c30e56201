pub mod countdown;
pub mod input;
pub mod result;
pub mod state;

pub use state::{Session, SessionEvent, Status, TEST_DURATION_SECS, apply};
