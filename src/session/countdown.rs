use std::time::{Duration, Instant};

use crate::session::state::Status;

/// Turns the event loop's sub-second ticks into whole-second session ticks.
/// Armed only while a session is `Started`.
pub struct Countdown {
    period: Duration,
    next_at: Option<Instant>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            next_at: None,
        }
    }

    pub fn disarm(&mut self) {
        self.next_at = None;
    }

    /// Arm on the transition into `Started`, disarm on any other status.
    pub fn sync(&mut self, status: Status, now: Instant) {
        match status {
            Status::Started => {
                if self.next_at.is_none() {
                    self.next_at = Some(now + self.period);
                }
            }
            Status::Waiting | Status::Finished => self.disarm(),
        }
    }

    /// Number of whole periods that became due since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_at else {
            return 0;
        };
        let mut due = 0;
        while now >= next {
            due += 1;
            next += self.period;
        }
        self.next_at = Some(next);
        due
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
